#[cfg(test)]
pub const POSTS_JSON: &str = r##"{
  "posts": [
    {
      "id": "hello-world",
      "title": "Hello & Welcome",
      "excerpt": "A first post",
      "content": "<p>Welcome to the <strong>new</strong> blog.</p><img src=\"/images/inline.png\" alt=\"inline\"><p>See the <a href=\"index.html\">archive</a>.</p>",
      "coverImage": "/images/cover.png",
      "date": "2024-01-15",
      "tags": ["intro", "meta"]
    },
    {
      "id": "rust-ownership",
      "title": "Ownership <explained>",
      "excerpt": "Borrowing without \"tears\"",
      "content": "<h2>Moves</h2><p>Values have exactly one owner.</p>",
      "coverImage": "https://cdn.example.org/rust.png",
      "date": "2024-02-03",
      "tags": ["rust", "memory"],
      "readingTime": 8
    },
    {
      "id": "site-news",
      "title": "Site news",
      "excerpt": "What changed",
      "content": "<p>New layout.</p>",
      "coverImage": "images/news.png",
      "date": "2024-03-10",
      "tags": ["meta"],
      "readingTime": 2
    }
  ]
}"##;

#[cfg(test)]
pub const POST_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{page_title}}</title>
    {{#meta_names}}
    <meta name="{{name}}" content="{{content}}">
    {{/meta_names}}
    {{#meta_properties}}
    <meta property="{{name}}" content="{{content}}">
    {{/meta_properties}}
    {{#article_tags}}
    <meta property="article:tag" content="{{tag}}">
    {{/article_tags}}
    <link rel="canonical" href="{{canonical}}">
    <link rel="stylesheet" href="css/style.css">
    <script type="application/ld+json" id="article-schema">{{{article_schema}}}</script>
    <script type="application/ld+json" id="breadcrumb-schema">{{{breadcrumb_schema}}}</script>
</head>
<body>
    <nav><a href="index.html">{{site_name}}</a> <a href="about.html">About</a></nav>
    <main class="main-content">
        <article id="postArticle">
            <h1 class="post-title" id="postTitle">{{post_title}}</h1>
            <div class="post-meta" id="postMeta">
                <div class="post-date">{{post_date}}</div>
                <div class="post-reading-time">{{reading_time}} min read</div>
                <div class="post-tags">{{#tags}}<span class="tag">{{tag}}</span>{{/tags}}</div>
            </div>
            <figure class="post-cover" id="postCover"><img src="{{cover_image}}" alt="{{cover_alt}}" /></figure>
            <div class="post-content" id="postContent">{{{post_content}}}</div>
        </article>
    </main>
    <script src="js/posts.js"></script>
</body>
</html>
"##;

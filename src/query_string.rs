use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    /// Accepts the query with or without its leading `?`. Malformed input yields no items.
    pub fn from(buf: &str) -> Self {
        let buf = buf.strip_prefix('?').unwrap_or(buf);
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|v| v.as_str())
    }

    /// The post id of a single post page, when present and not empty.
    pub fn get_id(&self) -> Option<&str> {
        self.get("id").filter(|id| !id.is_empty())
    }
}

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TrendsResponse {
    #[serde(default)]
    pub data: TrendsData,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsData {
    #[serde(default)]
    pub rows: Vec<TrendRow>,
}

/// One row of the trends endpoint. Numeric columns come back as strings
/// from some deployments, so `stars` is kept loose until coerced.
#[derive(Debug, Deserialize)]
pub struct TrendRow {
    pub repo_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub stars: Value,
    pub primary_language: Option<String>,
}

impl TrendRow {
    pub fn star_count(&self) -> Option<u64> {
        match &self.stars {
            Value::Null => Some(0),
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }
}

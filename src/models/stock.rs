use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 海龟系统中的单只股票信号
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockRow {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub entry_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub entry_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub current: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub stop_loss: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub trailing_stop: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub add_position: Option<f64>,
}

/// Both systems as delivered by one `/api/turtle-data` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemSnapshot {
    #[serde(default)]
    pub system1: Option<Vec<StockRow>>,
    #[serde(default)]
    pub system2: Option<Vec<StockRow>>,
}

impl SystemSnapshot {
    pub fn rows(&self, system: TurtleSystem) -> Option<&[StockRow]> {
        match system {
            TurtleSystem::System1 => self.system1.as_deref(),
            TurtleSystem::System2 => self.system2.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurtleSystem {
    System1,
    System2,
}

impl TurtleSystem {
    pub const ALL: [TurtleSystem; 2] = [TurtleSystem::System1, TurtleSystem::System2];

    /// CSS class of the section holding this system's table
    pub fn css_class(&self) -> &'static str {
        match self {
            TurtleSystem::System1 => "system1",
            TurtleSystem::System2 => "system2",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TurtleSystem::System1 => "System 1 (20-day breakout)",
            TurtleSystem::System2 => "System 2 (55-day breakout)",
        }
    }
}

// 后端可能把 Decimal 序列化为字符串，这里两种都接受
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("price out of range: {}", n))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid price: {:?}", s)))
        }
        Some(other) => Err(D::Error::custom(format!("invalid price: {}", other))),
    }
}

//! 十进制数的 JSON 编解码
//!
//! 写出为原样的 JSON 数字；读入接受数字或字符串，全程不经过浮点数。
//! 依赖 serde_json 的 `arbitrary_precision` 保留数字原文。

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Number::from_str(&value.to_string())
        .map_err(ser::Error::custom)?
        .serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    from_value(Value::deserialize(deserializer)?)
}

fn from_value<E: de::Error>(value: Value) -> Result<BigDecimal, E> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        other => {
            return Err(E::custom(format!(
                "expected a decimal number or string, found {}",
                other
            )))
        }
    };

    BigDecimal::from_str(text.trim()).map_err(|_| E::custom(format!("invalid decimal: {}", text)))
}

/// `Option<BigDecimal>` 版本，null 读作 `None`
pub mod option {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => super::from_value(value).map(Some),
        }
    }
}

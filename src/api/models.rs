use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    #[serde(deserialize_with = "id_string")]
    pub sender_id: String,
    #[serde(deserialize_with = "id_string")]
    pub receiver_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MessageHistory {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Body of `POST /api/messages`, sent form-encoded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MeetingRecord {
    pub meeting_date: String,
    pub meeting_time: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pulls the meeting list out of a bare array or a `meetings`/`data` wrapper.
pub fn meeting_records(json: Value) -> Result<Vec<MeetingRecord>, serde_json::Error> {
    let list = match json {
        Value::Array(_) => json,
        Value::Object(mut map) => map
            .remove("meetings")
            .or_else(|| map.remove("data"))
            .unwrap_or(Value::Array(Vec::new())),
        Value::Null => Value::Array(Vec::new()),
        other => other,
    };
    serde_json::from_value(list)
}

/// Ids arrive as JSON numbers or strings depending on the backend.
fn id_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unexpected id {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_string_ids_decode_alike() {
        let history: MessageHistory = serde_json::from_value(json!({
            "messages": [
                { "sender_id": 7, "receiver_id": "9", "content": "hi" },
                {
                    "sender_id": "9",
                    "receiver_id": 7,
                    "content": "hey",
                    "timestamp": "2024-05-01T10:00:00"
                }
            ]
        }))
        .unwrap();
        assert_eq!(history.messages[0].sender_id, "7");
        assert_eq!(history.messages[1].receiver_id, "7");
        assert_eq!(history.messages[1].timestamp.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn missing_messages_key_is_empty_history() {
        let history: MessageHistory = serde_json::from_value(json!({})).unwrap();
        assert!(history.messages.is_empty());
    }

    #[test]
    fn meeting_list_shapes() {
        let record = json!({ "meeting_date": "2024-05-01", "meeting_time": "10:00" });
        for body in [
            json!([record.clone()]),
            json!({ "meetings": [record.clone()] }),
            json!({ "data": [record.clone()] }),
        ] {
            let records = meeting_records(body).unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].status, None);
        }
        assert!(meeting_records(json!(null)).unwrap().is_empty());
        assert!(meeting_records(json!({ "detail": "nope" })).unwrap().is_empty());
        assert!(meeting_records(json!("nope")).is_err());
    }
}

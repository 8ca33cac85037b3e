use crate::domain::VideoRecord;
use crate::error::RepositoryError;
use crate::ports::repository::VideoRepository;
use async_trait::async_trait;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use uuid::Uuid;

type Item = HashMap<String, AttributeValue>;

/// DynamoVideoStore implements VideoRepository for AWS DynamoDB, one item per video
/// keyed by `video_id`.
#[derive(Clone)]
pub struct DynamoVideoStore {
    client: Client,
    table_name: String,
}

impl DynamoVideoStore {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Single put guarded by a condition on the key's existence.
    async fn put(&self, record: &VideoRecord, condition: &str) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(record)))
            .condition_expression(condition)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                PutItemError::ConditionalCheckFailedException(_) => {
                    RepositoryError::Missing(record.id)
                }
                other => RepositoryError::Unavailable(other.to_string()),
            })?;
        Ok(())
    }
}

fn to_item(record: &VideoRecord) -> Item {
    let mut item = Item::new();
    item.insert("video_id".into(), AttributeValue::S(record.id.to_string()));
    item.insert("user_id".into(), AttributeValue::S(record.user_id.to_string()));
    item.insert("title".into(), AttributeValue::S(record.title.clone()));
    if let Some(description) = &record.description {
        item.insert("description".into(), AttributeValue::S(description.clone()));
    }
    if let Some(video_url) = &record.video_url {
        item.insert("video_url".into(), AttributeValue::S(video_url.clone()));
    }
    item
}

fn from_item(item: &Item) -> Result<VideoRecord, RepositoryError> {
    let string = |name: &str| item.get(name).and_then(|v| v.as_s().ok()).cloned();
    let uuid = |name: &str| {
        string(name)
            .and_then(|s| Uuid::parse_str(&s).ok())
            .ok_or_else(|| RepositoryError::Unavailable(format!("item has no valid `{}`", name)))
    };

    Ok(VideoRecord {
        id: uuid("video_id")?,
        user_id: uuid("user_id")?,
        title: string("title").unwrap_or_default(),
        description: string("description"),
        video_url: string("video_url"),
    })
}

#[async_trait]
impl VideoRepository for DynamoVideoStore {
    async fn create(&self, record: &VideoRecord) -> Result<(), RepositoryError> {
        self.put(record, "attribute_not_exists(video_id)")
            .await
            .map_err(|e| match e {
                RepositoryError::Missing(id) => {
                    RepositoryError::Unavailable(format!("video {} already exists", id))
                }
                other => other,
            })
    }

    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, RepositoryError> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("video_id", AttributeValue::S(video_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        resp.item.as_ref().map(from_item).transpose()
    }

    async fn update(&self, record: &VideoRecord) -> Result<(), RepositoryError> {
        self.put(record, "attribute_exists(video_id)").await
    }
}

use crate::config::UpstreamConfig;
use crate::error::Result;
use serde::Deserialize;
use tracing::debug;

/// One consumer group as reported by the upstream endpoint.
/// Transient: lives only for the duration of a single poll cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumerGroupRecord {
    #[serde(rename = "groupId")]
    pub group_id: String,
    pub state: String,
    #[serde(rename = "consumerLag")]
    pub lag: f64,
}

/// Decoded upstream response. Two body shapes exist in the wild: the full
/// per-group form and a flatter aggregate-only form.
#[derive(Debug)]
pub enum FetchOutcome {
    Groups(Vec<ConsumerGroupRecord>),
    TotalLag(f64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamResponse {
    Grouped {
        #[serde(rename = "consumerGroups")]
        consumer_groups: Vec<ConsumerGroupRecord>,
    },
    Flat {
        group_lag: f64,
    },
}

pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    /// Issue one GET against the configured URL and decode the JSON body.
    ///
    /// Network failures and non-2xx statuses surface as `Fetch` errors,
    /// undecodable bodies as `Decode` errors. The caller logs and skips the
    /// cycle either way.
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        let response = self.client.get(&self.url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let decoded: UpstreamResponse = serde_json::from_str(&body)?;
        Ok(match decoded {
            UpstreamResponse::Grouped { consumer_groups } => {
                debug!(groups = consumer_groups.len(), "Decoded grouped response");
                FetchOutcome::Groups(consumer_groups)
            }
            UpstreamResponse::Flat { group_lag } => {
                debug!(group_lag, "Decoded flat response");
                FetchOutcome::TotalLag(group_lag)
            }
        })
    }
}

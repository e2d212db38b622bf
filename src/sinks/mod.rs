use crate::core::models::ScrapeResult;
use anyhow::Result;
use async_trait::async_trait;

/// Downstream consumer of a finished run. Object-store uploaders and
/// job-record patchers plug in behind the same seam; the core only ever
/// hands them the assembled result.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn publish(&self, result: &ScrapeResult) -> Result<()>;
}

/// Default sink: the result object as JSON on stdout.
#[derive(Default)]
pub struct JsonStdoutSink {
    pretty: bool,
}

impl JsonStdoutSink {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

#[async_trait]
impl ResultSink for JsonStdoutSink {
    async fn publish(&self, result: &ScrapeResult) -> Result<()> {
        let payload = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        println!("{}", payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Post;

    #[tokio::test]
    async fn test_stdout_sink_accepts_any_result() {
        let result = ScrapeResult::new("u", vec![Post::new("src", "cap")]);
        assert!(JsonStdoutSink::compact().publish(&result).await.is_ok());
        assert!(JsonStdoutSink::pretty().publish(&result).await.is_ok());
    }
}

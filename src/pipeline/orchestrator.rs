//! Search → fetch → scrape, one run at a time

use super::error::PipelineError;
use super::models::{Answer, Outcome, Query, Stage};
use crate::config::Settings;
use crate::engines::EngineLoader;
use crate::fetch::Fetcher;
use crate::network::{HttpClient, Transport};
use crate::scrape::Scraper;
use crate::search::{EngineProvider, Searcher};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Sequences the three stages and reports the effect of a run.
///
/// The pipeline never touches the editor; callers apply the returned
/// [`Outcome`].
pub struct Pipeline {
    searcher: Searcher,
    fetcher: Fetcher,
    scraper: Scraper,
    /// Held for the whole run; a second run gives up instead of queueing
    in_flight: Mutex<()>,
    stage: RwLock<Stage>,
}

impl Pipeline {
    pub fn new(searcher: Searcher, fetcher: Fetcher, scraper: Scraper) -> Self {
        Self {
            searcher,
            fetcher,
            scraper,
            in_flight: Mutex::new(()),
            stage: RwLock::new(Stage::Idle),
        }
    }

    /// Wire up the HTTP client, configured engine and scraper
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client: Arc<dyn Transport> = Arc::new(HttpClient::with_settings(&settings.outgoing)?);
        let engine = EngineLoader::load(&settings.search)?;
        let provider = Arc::new(EngineProvider::new(client.clone(), engine));

        let searcher = Searcher::new(
            provider,
            settings.search.target_domain.clone(),
            settings.search.results_per_page,
        );
        let fetcher = Fetcher::new(client);
        let scraper = Scraper::new(&settings.scrape.answer_selector)?;

        Ok(Self::new(searcher, fetcher, scraper))
    }

    /// Current stage of the in-flight run, `Idle` when none
    pub fn stage(&self) -> Stage {
        *self.stage.read().unwrap()
    }

    /// Run the pipeline for one selection
    pub async fn run(&self, query: &str, language: &str) -> Outcome {
        let query = Query::new(query, language);
        if query.is_empty() {
            debug!("Empty query, nothing to do");
            return Outcome::Skipped;
        }

        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("A run is already in flight, ignoring '{}'", query.text);
                return Outcome::Busy;
            }
        };
        let _idle = ResetStage(&self.stage);

        let span = info_span!(
            "pipeline_run",
            run_id = %Uuid::new_v4(),
            query = %query.text,
            language = %query.language
        );

        async {
            let outcome = match self.stages(&query).await {
                Ok(answer) if answer.is_empty() => Outcome::NotFound,
                Ok(answer) => Outcome::Inserted(answer),
                Err(err) => Outcome::Failed(err),
            };
            info!("Run finished: {:?}", outcome);
            outcome
        }
        .instrument(span)
        .await
    }

    async fn stages(&self, query: &Query) -> Result<Answer, PipelineError> {
        self.enter(Stage::Searching);
        let result = self.searcher.search(&query.text, &query.language).await?;

        self.enter(Stage::Fetching);
        let page = self.fetcher.fetch(&result.url).await?;

        self.enter(Stage::Scraping);
        Ok(self.scraper.scrape(&page.html))
    }

    fn enter(&self, stage: Stage) {
        debug!("Stage: {}", stage);
        *self.stage.write().unwrap() = stage;
    }
}

/// Puts the pipeline back to `Idle` when a run ends or its future is dropped
struct ResetStage<'a>(&'a RwLock<Stage>);

impl Drop for ResetStage<'_> {
    fn drop(&mut self) {
        debug!("Stage: {}", Stage::Idle);
        if let Ok(mut stage) = self.0.write() {
            *stage = Stage::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{EngineRequest, SearchLink};
    use crate::network::HttpResponse;
    use crate::search::SearchProvider;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const ANSWER_PAGE: &str = r#"
        <div id="question"><pre><code>lst.reverse()?</code></pre></div>
        <div class="answer accepted-answer"><pre><code>lst[::-1]</code></pre></div>
    "#;

    #[derive(Default)]
    struct StubProvider {
        links: Vec<&'static str>,
        queries: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn links(&self, query: &str, _: u32) -> anyhow::Result<Vec<SearchLink>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.links.iter().map(|l| SearchLink::new(*l)).collect())
        }
    }

    /// Maps URLs to (status, body); unknown URLs are transport errors
    #[derive(Default)]
    struct StubTransport {
        pages: HashMap<&'static str, (u16, &'static str)>,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn execute(&self, request: EngineRequest) -> anyhow::Result<HttpResponse> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(request.url.as_str())
                .map(|(status, body)| HttpResponse::new(*status, *body))
                .ok_or_else(|| anyhow::anyhow!("dns error"))
        }
    }

    fn pipeline(provider: Arc<dyn SearchProvider>, transport: Arc<StubTransport>) -> Pipeline {
        Pipeline::new(
            Searcher::new(provider, "stackoverflow.com", 1),
            Fetcher::new(transport),
            Scraper::default(),
        )
    }

    fn answer_site() -> Arc<StubTransport> {
        let mut pages = HashMap::new();
        pages.insert("https://stackoverflow.com/q/1", (200, ANSWER_PAGE));
        pages.insert("https://stackoverflow.com/q/2", (200, "<p>closed as duplicate</p>"));
        pages.insert("https://stackoverflow.com/q/3", (404, "gone"));
        Arc::new(StubTransport {
            pages,
            ..Default::default()
        })
    }

    fn provider(links: Vec<&'static str>) -> Arc<StubProvider> {
        Arc::new(StubProvider {
            links,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_answer_is_inserted() {
        let provider = provider(vec!["https://stackoverflow.com/q/1"]);
        let pipeline = pipeline(provider.clone(), answer_site());

        let outcome = pipeline.run("reverse a list", "Python").await;

        assert_eq!(outcome, Outcome::Inserted(Answer::new("lst[::-1]")));
        assert_eq!(
            provider.queries.lock().unwrap().as_slice(),
            &["reverse a list in Python site:stackoverflow.com".to_string()]
        );
        assert_eq!(pipeline.stage(), Stage::Idle);
    }

    #[tokio::test]
    async fn test_page_without_answer() {
        let pipeline = pipeline(provider(vec!["https://stackoverflow.com/q/2"]), answer_site());
        assert_eq!(pipeline.run("q", "Rust").await, Outcome::NotFound);
    }

    #[tokio::test]
    async fn test_no_results() {
        let transport = answer_site();
        let pipeline = pipeline(provider(vec![]), transport.clone());

        let outcome = pipeline.run("q", "Rust").await;

        assert_eq!(outcome, Outcome::Failed(PipelineError::NoResults));
        assert_eq!(transport.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failures() {
        let pipeline_404 = pipeline(provider(vec!["https://stackoverflow.com/q/3"]), answer_site());
        assert_eq!(
            pipeline_404.run("q", "Rust").await,
            Outcome::Failed(PipelineError::Fetch("HTTP status 404".to_string()))
        );

        let pipeline_dns = pipeline(provider(vec!["https://stackoverflow.com/q/9"]), answer_site());
        assert_eq!(
            pipeline_dns.run("q", "Rust").await,
            Outcome::Failed(PipelineError::Fetch("dns error".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_skipped() {
        let provider = provider(vec!["https://stackoverflow.com/q/1"]);
        let pipeline = pipeline(provider.clone(), answer_site());

        assert_eq!(pipeline.run("   \n", "Rust").await, Outcome::Skipped);
        assert!(provider.queries.lock().unwrap().is_empty());
    }

    /// Parks inside `links` until released
    struct BlockingProvider {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SearchProvider for BlockingProvider {
        fn name(&self) -> &str {
            "blocking"
        }

        async fn links(&self, _: &str, _: u32) -> anyhow::Result<Vec<SearchLink>> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(vec![SearchLink::new("https://stackoverflow.com/q/1")])
        }
    }

    #[tokio::test]
    async fn test_concurrent_run_is_ignored() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let provider = Arc::new(BlockingProvider {
            entered: entered.clone(),
            release: release.clone(),
        });
        let pipeline = pipeline(provider, answer_site());

        let first = pipeline.run("reverse a list", "Python");
        let second = async {
            entered.notified().await;
            assert_eq!(pipeline.stage(), Stage::Searching);
            let outcome = pipeline.run("another", "Python").await;
            release.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, Outcome::Inserted(Answer::new("lst[::-1]")));
        assert_eq!(second, Outcome::Busy);
        assert_eq!(pipeline.stage(), Stage::Idle);
    }

    #[tokio::test]
    async fn test_dropped_run_returns_to_idle() {
        let entered = Arc::new(Notify::new());
        let provider = Arc::new(BlockingProvider {
            entered: entered.clone(),
            release: Arc::new(Notify::new()),
        });
        let pipeline = pipeline(provider, answer_site());

        let mut run = Box::pin(pipeline.run("reverse a list", "Python"));
        tokio::select! {
            _ = &mut run => panic!("run finished while the search was parked"),
            _ = entered.notified() => {}
        }
        assert_eq!(pipeline.stage(), Stage::Searching);

        drop(run);

        assert_eq!(pipeline.stage(), Stage::Idle);
        assert!(pipeline.in_flight.try_lock().is_ok());
    }
}

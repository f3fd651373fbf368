use anyhow::Result;

use super::CompetitorsApi;
use crate::competitor::Competitor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Search,
    Results(Results),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Results {
    Loading,
    Loaded(Vec<Competitor>),
}

/// What happened to a submitted search.
#[derive(Debug)]
pub enum Submission {
    /// Blank input; nothing was sent.
    Ignored,
    Loaded,
    /// The view is back on the search screen.
    Failed(anyhow::Error),
}

/// Two-screen client state: search, then results.
#[derive(Debug)]
pub struct ClientView {
    screen: Screen,
    url: String,
}

impl Default for ClientView {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientView {
    pub fn new() -> Self {
        Self {
            screen: Screen::Search,
            url: String::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Switch to the loading results screen and return the website to look
    /// up. Blank input leaves the view untouched and returns `None`.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let website = input.trim();
        if website.is_empty() {
            return None;
        }
        self.url = website.to_string();
        self.screen = Screen::Results(Results::Loading);
        Some(self.url.clone())
    }

    /// Settle a pending lookup. A failure reverts to the search screen and is
    /// handed back for display.
    pub fn resolve(&mut self, result: Result<Vec<Competitor>>) -> Result<()> {
        match result {
            Ok(competitors) => {
                self.screen = Screen::Results(Results::Loaded(competitors));
                Ok(())
            }
            Err(e) => {
                self.screen = Screen::Search;
                Err(e)
            }
        }
    }

    /// Return to the search screen, forgetting the URL and any results.
    pub fn back(&mut self) {
        self.screen = Screen::Search;
        self.url.clear();
    }

    pub async fn submit(&mut self, api: &dyn CompetitorsApi, input: &str) -> Submission {
        let Some(website) = self.begin(input) else {
            return Submission::Ignored;
        };
        match self.resolve(api.fetch(&website).await) {
            Ok(()) => Submission::Loaded,
            Err(e) => Submission::Failed(e),
        }
    }
}

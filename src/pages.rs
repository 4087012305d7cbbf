// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a configured page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Content,
    Browsers,
}

/// How an action card behaves when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Launch an installed application (command is an argument vector)
    App,
    /// Open a URL with the system handler
    Url,
    /// Run a script relative to the application root
    Script,
    /// Static labeled graphic, not clickable
    Image,
}

/// One action card on a content page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionSpec {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default)]
    pub command: String,
}

/// One detectable installation form of a browser (native package, Flatpak, ...)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variant {
    /// Path whose existence means this variant is installed
    #[serde(default)]
    pub check: PathBuf,
    /// Desktop identifier compared against the current default browser
    #[serde(default)]
    pub desktop: String,
}

/// One browser choice on the browser page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrowserSpec {
    #[serde(default)]
    pub label: String,
    /// Package identifier handed to the install helper
    #[serde(default)]
    pub package: String,
    /// Variants in order of preference
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Content(Vec<ActionSpec>),
    Browsers(Vec<BrowserSpec>),
}

/// A configured page, immutable after loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub title: String,
    pub subtitle: String,
    pub icon: Option<String>,
    pub kind: PageKind,
}

impl PageSpec {
    pub fn page_type(&self) -> PageType {
        match self.kind {
            PageKind::Content(_) => PageType::Content,
            PageKind::Browsers(_) => PageType::Browsers,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse page configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("page {index} ({title}): invalid actions: {source}")]
    InvalidActions {
        index: usize,
        title: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Page as written in pages.yaml; `actions` is typed once page_type is known
#[derive(Debug, Deserialize)]
struct RawPage {
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    page_type: PageType,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    actions: Vec<serde_yaml::Value>,
}

/// Load the page list from a YAML file
pub fn load_pages(path: &Path) -> Result<Vec<PageSpec>, ConfigLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pages(&contents)
}

/// Parse the page list from YAML text. An empty document means no pages.
pub fn parse_pages(contents: &str) -> Result<Vec<PageSpec>, ConfigLoadError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Option<Vec<RawPage>> = serde_yaml::from_str(contents)?;

    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, page)| {
            let kind = match page.page_type {
                PageType::Content => typed_actions(page.actions).map(PageKind::Content),
                PageType::Browsers => typed_actions(page.actions).map(PageKind::Browsers),
            }
            .map_err(|source| ConfigLoadError::InvalidActions {
                index,
                title: page.title.clone(),
                source,
            })?;

            Ok(PageSpec {
                title: page.title,
                subtitle: page.subtitle,
                icon: page.icon,
                kind,
            })
        })
        .collect()
}

fn typed_actions<T: serde::de::DeserializeOwned>(
    actions: Vec<serde_yaml::Value>,
) -> Result<Vec<T>, serde_yaml::Error> {
    actions.into_iter().map(serde_yaml::from_value).collect()
}

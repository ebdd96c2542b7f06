//! Search form state for the three keyword-research queries.
//!
//! The form never talks to the network. It tracks user input, keeps the
//! language consistent with the selected location, and produces a
//! [`QueryRequest`] for the executor once every required field is set.

use devseo_core::{LanguageOption, QueryKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{default_language, CatalogState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("depth must be between 1 and 4, got {0}")]
    InvalidDepth(u8),

    #[error("limit {limit} is not offered for {kind} searches")]
    InvalidLimit { kind: QueryKind, limit: u32 },

    #[error("unknown location \"{0}\"")]
    UnknownLocation(String),

    #[error("language \"{language}\" is not offered for {location}")]
    UnknownLanguage { location: String, language: String },

    #[error("{0} searches take a single keyword")]
    SingleKeyword(QueryKind),

    #[error("ideas searches take a keyword list")]
    KeywordList,

    #[error("locations are still loading")]
    CatalogNotReady,

    #[error("{0}")]
    Incomplete(String),
}

/// Related-keywords tree depth, 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Depth(u8);

impl Depth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// # Errors
    ///
    /// Returns [`FormError::InvalidDepth`] outside `1..=4`.
    pub fn new(value: u8) -> Result<Self, FormError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FormError::InvalidDepth(value))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid depth, for option lists.
    pub fn options() -> impl Iterator<Item = Depth> {
        (Self::MIN..=Self::MAX).map(Depth)
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Depth {
    type Error = FormError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Depth> for u8 {
    fn from(depth: Depth) -> Self {
        depth.0
    }
}

const RELATED_LIMITS: &[u32] = &[10, 20, 50, 100];
const SUGGESTION_LIMITS: &[u32] = &[10, 20, 50, 100];
const IDEA_LIMITS: &[u32] = &[20, 50, 100];
const DEFAULT_LIMIT: u32 = 20;

/// Number of results requested; the allowed values depend on the query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u32")]
pub struct ResultLimit(u32);

impl ResultLimit {
    #[must_use]
    pub fn options(kind: QueryKind) -> &'static [u32] {
        match kind {
            QueryKind::Related => RELATED_LIMITS,
            QueryKind::Suggestions => SUGGESTION_LIMITS,
            QueryKind::Ideas => IDEA_LIMITS,
        }
    }

    /// # Errors
    ///
    /// Returns [`FormError::InvalidLimit`] when `value` is not offered for `kind`.
    pub fn new(kind: QueryKind, value: u32) -> Result<Self, FormError> {
        if Self::options(kind).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FormError::InvalidLimit { kind, limit: value })
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl From<ResultLimit> for u32 {
    fn from(limit: ResultLimit) -> Self {
        limit.0
    }
}

/// Query-specific part of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryParams {
    Related {
        keyword: String,
        depth: Depth,
        limit: ResultLimit,
    },
    Suggestions {
        keyword: String,
        include_serp_info: bool,
        include_seed_keyword: bool,
        limit: ResultLimit,
    },
    Ideas {
        keywords: Vec<String>,
        include_serp_info: bool,
        limit: ResultLimit,
    },
}

impl QueryParams {
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Related { .. } => QueryKind::Related,
            Self::Suggestions { .. } => QueryKind::Suggestions,
            Self::Ideas { .. } => QueryKind::Ideas,
        }
    }
}

/// A fully populated search request handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub location: String,
    pub language: String,
    pub params: QueryParams,
}

impl QueryRequest {
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.params.kind()
    }

    /// Message shown when a required field is missing.
    #[must_use]
    pub fn missing_fields_message(kind: QueryKind) -> &'static str {
        match kind {
            QueryKind::Ideas => "Please provide keywords, location and language for search",
            QueryKind::Related | QueryKind::Suggestions => {
                "Please provide keyword, location and language for search"
            }
        }
    }
}

/// One-shot form input, as submitted over HTTP or the command line.
/// `None` keeps the form's default for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchInput {
    pub keyword: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub location: Option<String>,
    pub language: Option<String>,
    pub depth: Option<u8>,
    pub limit: Option<u32>,
    pub include_serp_info: Option<bool>,
    pub include_seed_keyword: Option<bool>,
}

/// Input state of one search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryForm {
    kind: QueryKind,
    keyword: String,
    keywords: Vec<String>,
    location: String,
    language: String,
    depth: Depth,
    limit: ResultLimit,
    include_serp_info: bool,
    include_seed_keyword: bool,
}

impl QueryForm {
    #[must_use]
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            keyword: String::new(),
            keywords: Vec::new(),
            location: String::new(),
            language: String::new(),
            depth: Depth::default(),
            limit: ResultLimit::default(),
            include_serp_info: true,
            include_seed_keyword: true,
        }
    }

    /// Builds a form from one-shot input, starting from the catalog defaults.
    /// A location without a language picks that location's default language.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] raised by a setter.
    pub fn from_input(
        kind: QueryKind,
        catalog: &CatalogState,
        input: &SearchInput,
    ) -> Result<Self, FormError> {
        let mut form = Self::new(kind);
        form.load_defaults(catalog);

        if let Some(location) = input.location.as_deref() {
            form.select_location(catalog, location)?;
        }
        match input.language.as_deref() {
            Some(language) => form.select_language(catalog, language)?,
            None => form.apply_default_language(catalog),
        }

        match kind {
            QueryKind::Ideas => {
                for keyword in input.keyword.iter().chain(&input.keywords) {
                    form.add_keyword(keyword)?;
                }
            }
            QueryKind::Related | QueryKind::Suggestions => {
                if !input.keywords.is_empty() {
                    return Err(FormError::SingleKeyword(kind));
                }
                form.set_keyword(input.keyword.as_deref().unwrap_or_default())?;
            }
        }

        if let Some(depth) = input.depth {
            form.set_depth(depth)?;
        }
        if let Some(limit) = input.limit {
            form.set_limit(limit)?;
        }
        if let Some(include) = input.include_serp_info {
            form.set_include_serp_info(include);
        }
        if let Some(include) = input.include_seed_keyword {
            form.set_include_seed_keyword(include);
        }

        Ok(form)
    }

    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    #[must_use]
    pub fn limit(&self) -> ResultLimit {
        self.limit
    }

    /// Fills in the default location and language if nothing is selected yet.
    pub fn load_defaults(&mut self, catalog: &CatalogState) {
        if self.location.is_empty() {
            if let Some(default) = catalog.default_location() {
                self.location.clone_from(&default.location_name);
            }
        }
        if self.language.is_empty() {
            self.apply_default_language(catalog);
        }
    }

    /// Picks "English" for the current location when it offers it.
    pub fn apply_default_language(&mut self, catalog: &CatalogState) {
        if let Some(lang) = catalog
            .find_location(&self.location)
            .and_then(default_language)
        {
            self.language.clone_from(&lang.language_name);
        }
    }

    /// Sets the location and clears the language.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownLocation`] if the catalog has no selectable
    /// location of that name; the form is left unchanged.
    pub fn select_location(
        &mut self,
        catalog: &CatalogState,
        location_name: &str,
    ) -> Result<(), FormError> {
        match catalog.find_location(location_name) {
            Some(loc) if loc.is_selectable() => {
                self.location = location_name.to_string();
                self.language.clear();
                Ok(())
            }
            _ => Err(FormError::UnknownLocation(location_name.to_string())),
        }
    }

    /// # Errors
    ///
    /// Returns [`FormError::UnknownLanguage`] unless the current location
    /// offers `language_name`.
    pub fn select_language(
        &mut self,
        catalog: &CatalogState,
        language_name: &str,
    ) -> Result<(), FormError> {
        let offered = catalog
            .find_location(&self.location)
            .is_some_and(|loc| loc.offers_language(language_name));
        if !offered {
            return Err(FormError::UnknownLanguage {
                location: self.location.clone(),
                language: language_name.to_string(),
            });
        }
        self.language = language_name.to_string();
        Ok(())
    }

    /// Languages offered for the current location.
    #[must_use]
    pub fn language_options<'a>(&self, catalog: &'a CatalogState) -> &'a [LanguageOption] {
        catalog.languages_for(&self.location)
    }

    /// Seed keyword for related and suggestion searches.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::KeywordList`] on ideas forms; use
    /// [`QueryForm::add_keyword`] there.
    pub fn set_keyword(&mut self, keyword: &str) -> Result<(), FormError> {
        if self.kind == QueryKind::Ideas {
            return Err(FormError::KeywordList);
        }
        self.keyword = keyword.to_string();
        Ok(())
    }

    /// Adds a trimmed keyword to an ideas list. Returns `false` for blank or
    /// duplicate entries.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SingleKeyword`] on related and suggestion forms.
    pub fn add_keyword(&mut self, keyword: &str) -> Result<bool, FormError> {
        if self.kind != QueryKind::Ideas {
            return Err(FormError::SingleKeyword(self.kind));
        }
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return Ok(false);
        }
        self.keywords.push(keyword.to_string());
        Ok(true)
    }

    /// Returns whether the keyword was present.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }

    /// # Errors
    ///
    /// Returns [`FormError::InvalidDepth`] outside `1..=4`.
    pub fn set_depth(&mut self, depth: u8) -> Result<(), FormError> {
        self.depth = Depth::new(depth)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`FormError::InvalidLimit`] for a value not offered for this kind.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), FormError> {
        self.limit = ResultLimit::new(self.kind, limit)?;
        Ok(())
    }

    pub fn set_include_serp_info(&mut self, include: bool) {
        self.include_serp_info = include;
    }

    pub fn set_include_seed_keyword(&mut self, include: bool) {
        self.include_seed_keyword = include;
    }

    fn has_keywords(&self) -> bool {
        match self.kind {
            QueryKind::Ideas => !self.keywords.is_empty(),
            QueryKind::Related | QueryKind::Suggestions => !self.keyword.trim().is_empty(),
        }
    }

    /// Whether the submit action should be enabled.
    #[must_use]
    pub fn can_submit(&self, catalog: &CatalogState) -> bool {
        catalog.is_ready()
            && self.has_keywords()
            && !self.location.is_empty()
            && !self.language.is_empty()
    }

    /// Builds the request for the executor.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::CatalogNotReady`] while the catalog is loading or
    /// empty, and [`FormError::Incomplete`] when a required field is blank.
    pub fn submit(&self, catalog: &CatalogState) -> Result<QueryRequest, FormError> {
        if !catalog.is_ready() {
            return Err(FormError::CatalogNotReady);
        }
        if !self.can_submit(catalog) {
            return Err(FormError::Incomplete(
                QueryRequest::missing_fields_message(self.kind).to_string(),
            ));
        }

        let params = match self.kind {
            QueryKind::Related => QueryParams::Related {
                keyword: self.keyword.trim().to_string(),
                depth: self.depth,
                limit: self.limit,
            },
            QueryKind::Suggestions => QueryParams::Suggestions {
                keyword: self.keyword.trim().to_string(),
                include_serp_info: self.include_serp_info,
                include_seed_keyword: self.include_seed_keyword,
                limit: self.limit,
            },
            QueryKind::Ideas => QueryParams::Ideas {
                keywords: self.keywords.clone(),
                include_serp_info: self.include_serp_info,
                limit: self.limit,
            },
        };

        Ok(QueryRequest {
            location: self.location.clone(),
            language: self.language.clone(),
            params,
        })
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

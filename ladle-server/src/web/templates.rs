//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{ANY, PriceTag, SearchFilters, SubmissionSummary};
use crate::service::FilterOptions;

use super::dto::SubmitFormInput;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Search view: filter sidebar and results table.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub name: String,
    pub recommendations: String,
    pub tags: Vec<OptionView>,
    pub prices: Vec<OptionView>,
    pub authors: Vec<OptionView>,
    pub locations: Vec<OptionView>,
    pub results: Vec<SubmissionView>,
}

/// Submit view: the recommendation form.
#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub form: SubmitFormInput,
    pub prices: Vec<OptionView>,
    pub stations: Vec<OptionView>,
    pub errors: Vec<String>,
    pub notice: Option<String>,
    pub success: Option<String>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One `<option>` of a select box.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

impl OptionView {
    /// Options for `values`, marking those in `selected`.
    pub fn list<'a>(
        values: impl IntoIterator<Item = &'a str>,
        selected: &[impl AsRef<str>],
    ) -> Vec<OptionView> {
        values
            .into_iter()
            .map(|value| OptionView {
                value: value.to_string(),
                selected: selected.iter().any(|s| s.as_ref() == value),
            })
            .collect()
    }

    /// Options for a single-choice select with a leading `(Any)` entry.
    fn with_any<'a>(values: impl IntoIterator<Item = &'a str>, selected: Option<&str>) -> Vec<OptionView> {
        let chosen = [selected.unwrap_or(ANY)];
        OptionView::list(std::iter::once(ANY).chain(values), &chosen)
    }
}

/// A row of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionView {
    pub name: String,
    pub tags: String,
    pub price: String,
    pub author: String,
    pub recommendations: String,
    pub date_submitted: String,
    pub stations: String,
}

impl SubmissionView {
    /// Create from a search result.
    pub fn from_summary(summary: &SubmissionSummary) -> Self {
        Self {
            name: summary.name.clone(),
            tags: summary.tags.replace(',', ", "),
            price: summary.price_tag.to_string(),
            author: summary.author.clone().unwrap_or_default(),
            recommendations: summary.recommendations.clone().unwrap_or_default(),
            date_submitted: summary.date_submitted.format("%Y-%m-%d").to_string(),
            stations: summary.stations.join(", "),
        }
    }
}

impl SearchTemplate {
    /// Build the page for the given filters, vocabularies and results.
    pub fn new(filters: &SearchFilters, options: &FilterOptions, results: &[SubmissionSummary]) -> Self {
        let price = filters.price.map(|p| p.as_str());

        Self {
            name: filters.name.clone().unwrap_or_default(),
            recommendations: filters.recommendations.clone().unwrap_or_default(),
            tags: OptionView::list(options.tags.iter().map(String::as_str), &filters.tags),
            prices: OptionView::with_any(PriceTag::ALL.iter().map(|p| p.as_str()), price),
            authors: OptionView::with_any(
                options.authors.iter().map(String::as_str),
                filters.author.as_deref(),
            ),
            locations: OptionView::with_any(
                options.stations.iter().map(String::as_str),
                filters.location.as_deref(),
            ),
            results: results.iter().map(SubmissionView::from_summary).collect(),
        }
    }

    /// "1 submission found" / "N submissions found".
    pub fn summary_line(&self) -> String {
        match self.results.len() {
            1 => "1 submission found".to_string(),
            n => format!("{n} submissions found"),
        }
    }
}

impl SubmitTemplate {
    /// Build the form, re-selecting whatever `form` already holds.
    pub fn new(form: SubmitFormInput, station_names: &[String]) -> Self {
        let price = if form.price_tag.is_empty() {
            PriceTag::Cheap.as_str().to_string()
        } else {
            form.price_tag.clone()
        };

        Self {
            prices: OptionView::list(PriceTag::ALL.iter().map(|p| p.as_str()), &[price]),
            stations: OptionView::list(station_names.iter().map(String::as_str), &form.stations),
            form,
            errors: Vec::new(),
            notice: None,
            success: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }
}

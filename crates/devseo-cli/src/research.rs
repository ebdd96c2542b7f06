//! Keyword research command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use devseo_core::{Locale, LocationLanguage, QueryKind};
use devseo_dataforseo::DataForSeoClient;
use devseo_research::{
    export_csv, export_file_name, render::empty_message, CatalogSource, CatalogState,
    KeywordSource, QueryExecutor, QueryForm, QueryOutcome, ReferenceDataStore, ResultView,
    SearchInput,
};

use crate::OutputArgs;

/// Fetch the location catalog once for this invocation.
///
/// # Errors
///
/// Returns an error if the catalog could not be loaded.
pub(crate) async fn load_catalog(source: &dyn CatalogSource) -> anyhow::Result<CatalogState> {
    let store = ReferenceDataStore::new();
    store.initialize(source).await;
    let catalog = store.snapshot();
    if let Some(error) = &catalog.error {
        anyhow::bail!("failed to load locations: {error}");
    }
    Ok(catalog)
}

/// Print selectable locations with their languages.
///
/// # Errors
///
/// Returns an error if the catalog could not be loaded.
pub(crate) async fn run_locations(
    client: &DataForSeoClient,
    filter: Option<&str>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await?;
    let locations = filter_locations(&catalog, filter);

    if locations.is_empty() {
        println!(
            "no locations found{}",
            filter.map(|f| format!(" matching \"{f}\"")).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{:<40}{:<6}LANGUAGES", "LOCATION", "CODE");
    for location in locations {
        let languages: Vec<&str> = location
            .available_languages
            .iter()
            .map(|lang| lang.language_name.as_str())
            .collect();
        println!(
            "{:<40}{:<6}{}",
            location.location_name,
            location.country_code,
            languages.join(", ")
        );
    }

    Ok(())
}

/// Run one search and print, render or export its results.
///
/// # Errors
///
/// Returns an error if the catalog fails to load, the input is invalid, the
/// upstream call fails, or the CSV file cannot be written.
pub(crate) async fn run_search(
    client: &DataForSeoClient,
    kind: QueryKind,
    input: &SearchInput,
    output: &OutputArgs,
    default_locale: Locale,
) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await?;
    let request = QueryForm::from_input(kind, &catalog, input)?.submit(&catalog)?;
    tracing::info!(
        %kind,
        location = %request.location,
        language = %request.language,
        "running keyword search"
    );

    let outcome = execute(&catalog, client, request).await?;
    let QueryOutcome::Success {
        records,
        total_count,
    } = &outcome
    else {
        anyhow::bail!("search did not complete");
    };

    if let Some(path) = &output.csv {
        if records.is_empty() {
            println!("{}", empty_message(kind));
            return Ok(());
        }
        let path = csv_path(path, kind);
        tokio::fs::write(&path, export_csv(kind, records))
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "wrote {} of {total_count} keywords to {}",
            records.len(),
            path.display()
        );
        return Ok(());
    }

    let view = ResultView::from_outcome(kind, &outcome, output.locale.unwrap_or(default_locale));
    if output.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in table_lines(&view) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn execute(
    catalog: &CatalogState,
    source: &dyn KeywordSource,
    request: devseo_research::QueryRequest,
) -> anyhow::Result<QueryOutcome> {
    let executor = QueryExecutor::new();
    match executor.submit(catalog, source, request).await {
        QueryOutcome::Failure { message } => Err(anyhow::anyhow!(message)),
        outcome => Ok(outcome),
    }
}

fn filter_locations<'a>(
    catalog: &'a CatalogState,
    filter: Option<&str>,
) -> Vec<&'a LocationLanguage> {
    let needle = filter.map(str::to_lowercase);
    catalog
        .selectable_locations()
        .filter(|loc| {
            needle
                .as_deref()
                .is_none_or(|n| loc.location_name.to_lowercase().contains(n))
        })
        .collect()
}

/// A directory gets the dated default file name appended.
fn csv_path(path: &Path, kind: QueryKind) -> PathBuf {
    if path.is_dir() {
        path.join(export_file_name(kind, Utc::now().date_naive()))
    } else {
        path.to_path_buf()
    }
}

/// Plain-text rendering of a result view, columns padded to their widest cell.
fn table_lines(view: &ResultView) -> Vec<String> {
    match view {
        ResultView::Idle => Vec::new(),
        ResultView::Loading => vec!["loading...".to_string()],
        ResultView::Failure { message } => vec![format!("error: {message}")],
        ResultView::Empty { message } => vec![(*message).to_string()],
        ResultView::Table {
            columns,
            rows,
            total_count,
        } => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|row| {
                    vec![
                        row.keyword.clone(),
                        row.search_volume.text.clone(),
                        row.difficulty.text.clone(),
                        row.cpc.clone(),
                        row.competition.label.clone(),
                        row.intent.label.clone(),
                        row.extra.clone(),
                    ]
                })
                .collect();

            let widths: Vec<usize> = columns
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    cells
                        .iter()
                        .map(|row| row[i].chars().count())
                        .chain(std::iter::once(header.chars().count()))
                        .max()
                        .unwrap_or_default()
                })
                .collect();

            let mut lines = Vec::with_capacity(cells.len() + 2);
            lines.push(pad_row(columns.iter().map(|c| (*c).to_uppercase()), &widths));
            lines.extend(cells.into_iter().map(|row| pad_row(row, &widths)));
            lines.push(format!("showing {} of {total_count} keywords", rows.len()));
            lines
        }
    }
}

fn pad_row(cells: impl IntoIterator<Item = String>, widths: &[usize]) -> String {
    cells
        .into_iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

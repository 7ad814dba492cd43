use std::sync::Arc;

use anyhow::{Context, Result};

use confcat_application::CategorySessionUseCase;
use confcat_core::config::AppConfig;
use confcat_core::query::{PageRequest, SortSpec};

pub async fn run(
    config: AppConfig,
    category_id: i64,
    page: u32,
    page_size: Option<u32>,
    sort_by: &str,
    descending: bool,
) -> Result<()> {
    let catalog = Arc::new(super::open_catalog(&config).await?);
    let usecase = CategorySessionUseCase::new(catalog.clone(), catalog);

    let page = PageRequest::new(page.max(1), page_size.unwrap_or(config.paging.default_page_size).max(1));
    let sort = SortSpec::from_params(Some(sort_by), !descending);
    let result = usecase
        .get_sessions_by_category(category_id, page, sort, None)
        .await?;

    let json = serde_json::to_string_pretty(&result).context("Failed to render result")?;
    println!("{}", json);
    Ok(())
}

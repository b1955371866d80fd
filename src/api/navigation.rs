//! Navigation Layout Endpoints

use super::{client, unwrap_record, ApiError};
use crate::nav_layout::NavLayout;

const NAVIGATION_PATH: &str = "navigation";

/// Published layout, repaired so every page appears once
pub async fn load_navigation() -> Result<NavLayout, ApiError> {
    let body = client::get(NAVIGATION_PATH).await?;
    let layout: NavLayout = unwrap_record(body, "layout")?;
    Ok(layout.normalized())
}

pub async fn publish_navigation(layout: &NavLayout) -> Result<(), ApiError> {
    client::put(NAVIGATION_PATH, layout).await.map(|_| ())
}

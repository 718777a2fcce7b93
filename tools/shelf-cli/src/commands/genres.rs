//! Genre listing.

use anyhow::Result;

use crate::context::Context;

pub async fn run(ctx: &Context) -> Result<()> {
    let genres = ctx.client()?.list_genres().await?;

    if ctx.output.is_json() {
        ctx.output.json(&genres);
        return Ok(());
    }

    ctx.output.header("Genres");
    if genres.is_empty() {
        ctx.output.info("No genres defined.");
    }
    for genre in &genres {
        ctx.output.list_item(&format!("{:>4}  {}", genre.id.as_str(), genre.name));
    }
    Ok(())
}

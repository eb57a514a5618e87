use clap::Subcommand;

use crate::api::resources::{self, Page, Resource};
use crate::cli::utils::output_value;
use crate::cli::{Context, OutputFormat};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Subcommand)]
pub enum DataCommands {
    #[command(about = "List a collection")]
    List {
        #[arg(help = "Collection: leads, students, batches, courses, users, attendance, exams")]
        resource: String,
        #[arg(long, help = "Page number (defaults to 1 when --page-size is given)")]
        page: Option<u32>,
        #[arg(long, help = "Page size (defaults to 50 when --page is given)")]
        page_size: Option<u32>,
    },

    #[command(about = "Show a single record")]
    Show {
        #[arg(help = "Collection name")]
        resource: String,
        #[arg(help = "Record ID")]
        id: String,
    },
}

/// Paging is sent only when at least one of the two flags was given
pub fn page_from_args(page: Option<u32>, page_size: Option<u32>) -> Option<Page> {
    match (page, page_size) {
        (None, None) => None,
        (page, page_size) => Some(Page {
            page: page.unwrap_or(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }),
    }
}

pub async fn handle(cmd: DataCommands, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DataCommands::List { resource, page, page_size } => {
            let resource: Resource = resource.parse()?;
            let body = resources::list(&ctx.client, resource, page_from_args(page, page_size)).await?;
            output_value(&output_format, &body)
        }
        DataCommands::Show { resource, id } => {
            let resource: Resource = resource.parse()?;
            let body = resources::get(&ctx.client, resource, &id).await?;
            output_value(&output_format, &body)
        }
    }
}

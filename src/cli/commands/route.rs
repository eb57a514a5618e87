use serde_json::json;

use crate::cli::{Context, OutputFormat};
use crate::routes::{guard, RouteDecision};

pub fn handle(path: &str, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    let decision = guard(ctx.store.as_ref(), &ctx.config, path);

    match output_format {
        OutputFormat::Json => {
            let value = match &decision {
                RouteDecision::Render { shell, route } => json!({
                    "decision": "render",
                    "shell": shell,
                    "route": route.path(),
                }),
                RouteDecision::Redirect(navigation) => json!({
                    "decision": "redirect",
                    "to": navigation.path,
                    "kind": navigation.kind,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => match &decision {
            RouteDecision::Render { shell, route } => println!("render {} in {:?} shell", route, shell),
            RouteDecision::Redirect(navigation) => println!("redirect ({:?}) to {}", navigation.kind, navigation.path),
        },
    }

    Ok(())
}

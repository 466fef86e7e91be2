//! `cfzone zones` subcommands.

use std::io::Write;

use cfzone_api::Zone;

use crate::cli::ZonesCommand;
use crate::context::Context;
use crate::error::Result;
use crate::output::OutputFormat;

const ZONE_HEADERS: [&str; 3] = ["ID", "Name", "Status"];

pub async fn run<W: Write>(command: ZonesCommand, ctx: &mut Context<W>) -> Result<()> {
    match command {
        ZonesCommand::List => list(ctx).await,
        ZonesCommand::Get { zone } => get(ctx, &zone).await,
    }
}

async fn list<W: Write>(ctx: &mut Context<W>) -> Result<()> {
    let client = ctx.client()?;
    let zones = client.list_zones().await?;

    if zones.is_empty() {
        return ctx.writer.write_success("No zones found");
    }

    let rows: Vec<Vec<String>> = zones.iter().map(zone_row).collect();
    ctx.writer.write_table(&ZONE_HEADERS, &rows)
}

async fn get<W: Write>(ctx: &mut Context<W>, zone: &str) -> Result<()> {
    let client = ctx.client()?;
    let zone = client.get_zone(zone).await?;

    match ctx.writer.format() {
        OutputFormat::Json => ctx.writer.write_json(&zone),
        OutputFormat::Table => ctx.writer.write_table(&ZONE_HEADERS, &[zone_row(&zone)]),
    }
}

fn zone_row(zone: &Zone) -> Vec<String> {
    vec![zone.id.clone(), zone.name.clone(), zone.status.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfzone_api::ZoneStatus;

    use crate::config::Config;
    use crate::output::Writer;

    #[test]
    fn zone_rows_carry_id_name_and_status() {
        let zone = Zone {
            id: "023e105f4ecef8ad9ca31a8372d0c353".to_string(),
            name: "example.com".to_string(),
            status: ZoneStatus::Active,
        };
        assert_eq!(
            zone_row(&zone),
            vec![
                "023e105f4ecef8ad9ca31a8372d0c353",
                "example.com",
                "active"
            ]
        );
    }

    #[tokio::test]
    async fn empty_zone_list_prints_the_no_zones_message() {
        let mut server = mockito::Server::new_async().await;
        let _zones = server
            .mock("GET", "/zones")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "success": true,
                    "errors": [],
                    "result": [],
                    "result_info": { "page": 1, "per_page": 50, "total_count": 0 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut ctx = Context {
            config: Config {
                api_token: Some("test-token".to_string()),
                ..Config::default()
            },
            config_path: None,
            api_base: Some(server.url()),
            writer: Writer::new(OutputFormat::Table, Vec::new()),
        };
        run(ZonesCommand::List, &mut ctx)
            .await
            .expect("an empty account should still list");

        let out = String::from_utf8(ctx.writer.into_inner()).unwrap();
        assert_eq!(out, "No zones found\n");
    }
}

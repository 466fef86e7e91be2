//! `cfzone dns` subcommands.
//!
//! Single-record results (`get`, `create`, `update`) print the raw record
//! JSON in JSON mode so scripts get every field, and a table (plus a
//! confirmation line for writes) in table mode.

use std::io::Write;

use cfzone_api::{CreateRecordParams, DnsRecord, UpdateRecordParams};

use crate::cli::{CreateArgs, DnsCommand, FilterArgs, UpdateArgs};
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output::{format_ttl, OutputFormat};

const RECORD_HEADERS: [&str; 6] = ["ID", "Type", "Name", "Content", "TTL", "Proxied"];

pub async fn run<W: Write>(command: DnsCommand, ctx: &mut Context<W>) -> Result<()> {
    match command {
        DnsCommand::List { zone, filter } => {
            list(ctx, &zone, filter, "No DNS records found").await
        }
        DnsCommand::Find { zone, filter } => {
            if filter.record_type.is_none() && filter.name.is_none() {
                return Err(CliError::Validation(
                    "at least one of --name or --type is required".to_string(),
                ));
            }
            list(ctx, &zone, filter, "No matching DNS records found").await
        }
        DnsCommand::Get { zone, record_id } => get(ctx, &zone, &record_id).await,
        DnsCommand::Create { zone, record } => create(ctx, &zone, record).await,
        DnsCommand::Update {
            zone,
            record_id,
            changes,
        } => update(ctx, &zone, &record_id, changes).await,
        DnsCommand::Delete { zone, record_id } => delete(ctx, &zone, &record_id).await,
    }
}

async fn list<W: Write>(
    ctx: &mut Context<W>,
    zone: &str,
    filter: FilterArgs,
    empty_message: &str,
) -> Result<()> {
    let client = ctx.client()?;
    let zone_id = client.resolve_zone_id(zone).await?;
    let records = client
        .list_records(&zone_id, filter.record_type, filter.name.as_deref())
        .await?;

    if records.is_empty() {
        return ctx.writer.write_success(empty_message);
    }

    let rows: Vec<Vec<String>> = records.iter().map(record_row).collect();
    ctx.writer.write_table(&RECORD_HEADERS, &rows)
}

async fn get<W: Write>(ctx: &mut Context<W>, zone: &str, record_id: &str) -> Result<()> {
    let client = ctx.client()?;
    let zone_id = client.resolve_zone_id(zone).await?;
    let record = client.get_record(&zone_id, record_id).await?;
    write_record(ctx, &record)
}

async fn create<W: Write>(ctx: &mut Context<W>, zone: &str, args: CreateArgs) -> Result<()> {
    let client = ctx.client()?;
    let zone_id = client.resolve_zone_id(zone).await?;

    let params = CreateRecordParams {
        record_type: args.record_type,
        name: args.name,
        content: args.content,
        ttl: args.ttl,
        proxied: args.proxied.unwrap_or(false),
        priority: args.priority,
        comment: args.comment,
    };
    let record = client.create_record(&zone_id, &params).await?;

    if ctx.writer.format() == OutputFormat::Json {
        return ctx.writer.write_json(&record);
    }
    ctx.writer
        .write_success(&format!("Created DNS record: {}", record.id))?;
    ctx.writer.write_table(&RECORD_HEADERS, &[record_row(&record)])
}

async fn update<W: Write>(
    ctx: &mut Context<W>,
    zone: &str,
    record_id: &str,
    changes: UpdateArgs,
) -> Result<()> {
    let client = ctx.client()?;
    let zone_id = client.resolve_zone_id(zone).await?;

    let existing = client.get_record(&zone_id, record_id).await?;
    let params = merge_update(&existing, changes);
    let record = client.update_record(&zone_id, record_id, &params).await?;

    if ctx.writer.format() == OutputFormat::Json {
        return ctx.writer.write_json(&record);
    }
    ctx.writer
        .write_success(&format!("Updated DNS record: {}", record.id))?;
    ctx.writer.write_table(&RECORD_HEADERS, &[record_row(&record)])
}

async fn delete<W: Write>(ctx: &mut Context<W>, zone: &str, record_id: &str) -> Result<()> {
    let client = ctx.client()?;
    let zone_id = client.resolve_zone_id(zone).await?;
    client.delete_record(&zone_id, record_id).await?;

    ctx.writer
        .write_success(&format!("Deleted DNS record: {record_id}"))
}

/// Merge update flags over the record's current state. Every field the
/// user left unset keeps its stored value; `comment` is the exception in
/// that an absent flag omits it from the request while an explicit empty
/// string clears it.
fn merge_update(existing: &DnsRecord, changes: UpdateArgs) -> UpdateRecordParams {
    UpdateRecordParams {
        record_type: changes.record_type.unwrap_or(existing.record_type),
        name: changes.name.unwrap_or_else(|| existing.name.clone()),
        content: changes.content.unwrap_or_else(|| existing.content.clone()),
        ttl: changes.ttl.unwrap_or(existing.ttl),
        proxied: changes.proxied.unwrap_or(existing.proxied),
        priority: changes.priority.or(existing.priority),
        comment: changes.comment,
    }
}

fn write_record<W: Write>(ctx: &mut Context<W>, record: &DnsRecord) -> Result<()> {
    match ctx.writer.format() {
        OutputFormat::Json => ctx.writer.write_json(record),
        OutputFormat::Table => ctx.writer.write_table(&RECORD_HEADERS, &[record_row(record)]),
    }
}

fn record_row(record: &DnsRecord) -> Vec<String> {
    vec![
        record.id.clone(),
        record.record_type.to_string(),
        record.name.clone(),
        record.content.clone(),
        format_ttl(record.ttl),
        record.proxied.to_string(),
    ]
}

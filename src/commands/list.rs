//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::{ContentRecord, ContentSource, SecondaryField};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let stdout = std::io::stdout();
    write_listing(site, content_type, &mut stdout.lock())
}

/// Write the listing for `content_type` to `out`
pub fn write_listing<W: Write>(site: &Site, content_type: &str, out: &mut W) -> Result<()> {
    match content_type {
        "post" | "posts" => write_records(out, "Posts", site.posts.get_all())?,
        "event" | "events" => write_records(out, "Events", site.events.get_all())?,
        "tag" | "tags" => {
            let mut tags = site.posts.tags();
            for (tag, count) in site.events.tags() {
                match tags.iter_mut().find(|(t, _)| *t == tag) {
                    Some((_, total)) => *total += count,
                    None => tags.push((tag, count)),
                }
            }
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, event, tag",
                content_type
            );
        }
    }

    Ok(())
}

fn write_records<W: Write, F: SecondaryField>(
    out: &mut W,
    heading: &str,
    records: &[ContentRecord<F>],
) -> Result<()> {
    writeln!(out, "{} ({}):", heading, records.len())?;
    for record in records {
        writeln!(
            out,
            "  {} - {} [{}]",
            record.date.format("%Y-%m-%d"),
            record.title,
            record.slug
        )?;
    }
    Ok(())
}

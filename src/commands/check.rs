//! Validate the content directory

use anyhow::Result;

use crate::Inkpress;

/// Load every post and report collection-level problems.
///
/// A malformed document already fails the load itself. On top of that,
/// duplicate slugs are reported: the collection tolerates them, but lookups
/// only ever see the first match.
pub fn run(app: &Inkpress) -> Result<()> {
    let collection = app.load_collection()?;

    for slug in collection.duplicate_slugs() {
        println!("warning: duplicate slug `{}`", slug);
    }

    println!("OK: {} posts", collection.len());
    Ok(())
}

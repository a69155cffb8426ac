use super::{TableCache, TableProvider};

use futures::future::try_join_all;
use std::collections::BTreeSet;
use tantalim_core::{schema::ModelDef, Error, Result};

/// Fetches every table `def` needs until the cache holds all of them.
///
/// Each round fetches the complete set of missing tables concurrently. A
/// round always grows the cache by at least one entry or fails, so this
/// terminates once the finite set of referenced names is cached.
pub(super) async fn resolve(
    cache: &TableCache,
    provider: Option<&dyn TableProvider>,
    def: &ModelDef,
) -> Result<()> {
    let mut round = 0;

    loop {
        round += 1;

        let mut missing = BTreeSet::new();
        collect_missing(cache, def, &mut missing);

        if missing.is_empty() {
            return Ok(());
        }

        tracing::debug!(round, ?missing, "fetching table metadata");

        let Some(provider) = provider else {
            let name = missing.into_iter().next().unwrap_or_default();
            return Err(Error::table_not_found(name));
        };

        let tables = try_join_all(missing.iter().map(|name| provider.table(name))).await?;

        for (name, table) in missing.into_iter().zip(tables) {
            cache.insert(name, table);
        }
    }
}

/// Table names referenced by `def` and its children that are not cached.
///
/// Steps whose source table is not cached yet are skipped; their targets are
/// discovered in a later round. Names that do not resolve are left for the
/// bind phase to report.
fn collect_missing(cache: &TableCache, def: &ModelDef, missing: &mut BTreeSet<String>) {
    if let Some(basis) = &def.basis_table {
        match cache.get(basis) {
            None => {
                missing.insert(basis.clone());
            }
            Some(basis_table) => {
                // Target table of each step, by step name
                let mut targets: Vec<(String, String)> = vec![];

                for step in &def.steps {
                    let source = match &step.previous_step {
                        Some(previous) => targets
                            .iter()
                            .find(|(name, _)| name == previous)
                            .and_then(|(_, table)| cache.get(table)),
                        None => Some(basis_table.clone()),
                    };

                    let join = source
                        .as_deref()
                        .zip(step.join.as_deref())
                        .and_then(|(source, join)| source.join(join));

                    if let Some(join) = join {
                        if !cache.contains(&join.table) {
                            missing.insert(join.table.clone());
                        }
                        targets.push((step.name.clone(), join.table.clone()));
                    }
                }
            }
        }
    }

    for child in &def.children {
        collect_missing(cache, child, missing);
    }
}

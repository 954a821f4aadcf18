//! To-do Enrichment
//!
//! Attaches a source label to each to-do: the owning appliance's name, or the
//! space key for space-scoped to-dos.

use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;

use crate::error::SyncError;
use crate::gateway::RemoteGateway;
use crate::model::{ApplianceId, RawTodo, Todo};
use crate::scope::Scope;

/// Normalize and label a batch of raw to-dos.
///
/// One name lookup is issued per distinct appliance id, all in flight at
/// once. A failed lookup only affects the to-dos of that appliance.
pub async fn enrich<G>(gateway: &G, raw: Vec<RawTodo>) -> Vec<Todo>
where
    G: RemoteGateway + ?Sized,
{
    let todos: Vec<Todo> = raw.into_iter().map(RawTodo::normalize).collect();

    let ids: BTreeSet<ApplianceId> = todos.iter().filter_map(|t| t.owner.appliance_id()).collect();
    let names = resolve_names(gateway, ids).await;

    todos
        .into_iter()
        .map(|mut todo| {
            todo.source_label = source_label(&todo.owner, &names);
            todo
        })
        .collect()
}

/// Label a single confirmed to-do.
pub async fn enrich_one<G>(gateway: &G, raw: RawTodo) -> Todo
where
    G: RemoteGateway + ?Sized,
{
    let mut todo = raw.normalize();
    let names = resolve_names(gateway, todo.owner.appliance_id().into_iter().collect()).await;
    todo.source_label = source_label(&todo.owner, &names);
    todo
}

async fn resolve_names<G>(gateway: &G, ids: BTreeSet<ApplianceId>) -> HashMap<ApplianceId, String>
where
    G: RemoteGateway + ?Sized,
{
    let lookups = ids.into_iter().map(|id| async move {
        let result = gateway.get_appliance(id).await.map_err(|source| SyncError::Lookup {
            appliance_id: id,
            source,
        });
        (id, result)
    });

    let mut names = HashMap::new();
    for (id, result) in join_all(lookups).await {
        match result {
            Ok(appliance) if appliance.appliance_name.is_empty() => {
                names.insert(id, format!("Appliance {}", id));
            }
            Ok(appliance) => {
                names.insert(id, appliance.appliance_name);
            }
            Err(e) => log::warn!("[Enrich] {}", e),
        }
    }
    names
}

fn source_label(owner: &Scope, names: &HashMap<ApplianceId, String>) -> Option<String> {
    match owner {
        Scope::Appliance(id) => names.get(id).cloned(),
        other => other.label_fallback(),
    }
}

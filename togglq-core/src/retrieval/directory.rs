//! Workspace projects, clients and tags, looked up by name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::query::SelectionItem;
use crate::types::{Client, ClientId, Project, ProjectId, Tag, TagId};

/// The named objects of one workspace.
///
/// Name lookups ignore case, matching how names are typed into queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Directory {
    pub fn project_id(&self, name: &str) -> Option<ProjectId> {
        self.projects
            .iter()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
            .map(|p| p.id)
    }

    pub fn client_id(&self, name: &str) -> Option<ClientId> {
        self.clients
            .iter()
            .find(|c| c.name.to_lowercase() == name.to_lowercase())
            .map(|c| c.id)
    }

    pub fn tag_id(&self, name: &str) -> Option<TagId> {
        self.tags
            .iter()
            .find(|t| t.name.to_lowercase() == name.to_lowercase())
            .map(|t| t.id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn client_of_project(&self, id: ProjectId) -> Option<ClientId> {
        self.project(id).and_then(|p| p.client_id)
    }

    /// Resolve selected projects to ids. Numeric items pass through.
    pub fn resolve_projects(&self, items: &[SelectionItem]) -> Result<Vec<ProjectId>> {
        items
            .iter()
            .map(|item| match item {
                SelectionItem::Id(id) => Ok(*id),
                SelectionItem::Name(name) => self
                    .project_id(name)
                    .ok_or_else(|| unknown("project", name)),
            })
            .collect()
    }

    pub fn resolve_clients(&self, items: &[SelectionItem]) -> Result<Vec<ClientId>> {
        items
            .iter()
            .map(|item| match item {
                SelectionItem::Id(id) => Ok(*id),
                SelectionItem::Name(name) => self
                    .client_id(name)
                    .ok_or_else(|| unknown("client", name)),
            })
            .collect()
    }

    pub fn resolve_tags(&self, names: &[String]) -> Result<Vec<TagId>> {
        names
            .iter()
            .map(|name| self.tag_id(name).ok_or_else(|| unknown("tag", name)))
            .collect()
    }
}

fn unknown(kind: &'static str, name: &str) -> Error {
    Error::UnknownName {
        kind,
        name: name.to_string(),
    }
}

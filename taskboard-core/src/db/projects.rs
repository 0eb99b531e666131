use serde_json::{Map, Value};

use super::patch::merge;
use super::{next_id, Database};
use crate::error::{Result, StoreError};
use crate::models::{timestamp_now, CreateProjectInput, Id, Project, ProjectDeletion, ProjectFilter};

const IMMUTABLE_FIELDS: &[&str] = &["id", "createdAt"];

impl Database {
    pub fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        self.read(|document| {
            Ok(document
                .projects
                .iter()
                .filter(|project| filter.matches(project))
                .cloned()
                .collect())
        })
    }

    pub fn get_project(&self, id: Id) -> Result<Project> {
        self.read(|document| {
            document
                .projects
                .iter()
                .find(|project| project.id == id)
                .cloned()
                .ok_or_else(|| StoreError::project_not_found(id))
        })
    }

    pub fn create_project(&self, input: CreateProjectInput) -> Result<Project> {
        if !input.is_complete() {
            return Err(StoreError::validation("Name and description are required"));
        }
        let CreateProjectInput { name, description } = input;

        let project = self.write(|document| {
            let project = Project {
                id: next_id(&document.projects)?,
                name: name.unwrap_or_default(),
                description: description.unwrap_or_default(),
                created_at: timestamp_now(),
                extra: Map::new(),
            };
            document.projects.push(project.clone());
            Ok(project)
        })?;

        tracing::info!(project_id = project.id, "Project created");
        Ok(project)
    }

    /// Shallow-merge `patch` into the project. `id` and `createdAt` are never
    /// overwritten.
    pub fn update_project(&self, id: Id, patch: &Map<String, Value>) -> Result<Project> {
        let project = self.write(|document| {
            let existing = document
                .projects
                .iter_mut()
                .find(|project| project.id == id)
                .ok_or_else(|| StoreError::project_not_found(id))?;

            let merged: Project = merge(&*existing, patch, IMMUTABLE_FIELDS, "project")?;
            if !merged.is_valid() {
                return Err(StoreError::validation("Name and description must not be empty"));
            }
            *existing = merged.clone();
            Ok(merged)
        })?;

        tracing::info!(project_id = id, "Project updated");
        Ok(project)
    }

    /// Remove the project together with all of its tasks.
    pub fn delete_project(&self, id: Id) -> Result<ProjectDeletion> {
        let deletion = self.write(|document| {
            let index = document
                .projects
                .iter()
                .position(|project| project.id == id)
                .ok_or_else(|| StoreError::project_not_found(id))?;
            document.projects.remove(index);

            let before = document.tasks.len();
            document.tasks.retain(|task| task.project_id != id);

            Ok(ProjectDeletion {
                project_id: id,
                deleted_tasks: before - document.tasks.len(),
            })
        })?;

        tracing::info!(
            project_id = id,
            deleted_tasks = deletion.deleted_tasks,
            "Project deleted"
        );
        Ok(deletion)
    }
}

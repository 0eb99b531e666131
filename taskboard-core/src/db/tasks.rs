use serde_json::{Map, Value};

use super::patch::merge;
use super::{next_id, Database};
use crate::error::{Result, StoreError};
use crate::models::{timestamp_now, CreateTaskInput, Id, Task, TaskFilter};

const IMMUTABLE_FIELDS: &[&str] = &["id", "createdAt", "projectId"];

impl Database {
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.read(|document| {
            Ok(document
                .tasks
                .iter()
                .filter(|task| filter.matches(task))
                .cloned()
                .collect())
        })
    }

    pub fn get_task(&self, id: Id) -> Result<Task> {
        self.read(|document| {
            document
                .tasks
                .iter()
                .find(|task| task.id == id)
                .cloned()
                .ok_or_else(|| StoreError::task_not_found(id))
        })
    }

    /// Create a task under an existing project. Status defaults to `to_do`,
    /// priority to `medium`.
    pub fn create_task(&self, input: CreateTaskInput) -> Result<Task> {
        if !input.is_complete() {
            return Err(StoreError::validation(
                "ProjectId, title and description are required",
            ));
        }
        let CreateTaskInput {
            project_id,
            title,
            description,
            status,
            priority,
        } = input;
        let project_id = project_id.unwrap_or_default();

        let task = self.write(|document| {
            if !document.projects.iter().any(|project| project.id == project_id) {
                return Err(StoreError::validation(format!(
                    "Project with ID {project_id} does not exist"
                )));
            }

            let task = Task {
                id: next_id(&document.tasks)?,
                project_id,
                title: title.unwrap_or_default(),
                description: description.unwrap_or_default(),
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                created_at: timestamp_now(),
                extra: Map::new(),
            };
            document.tasks.push(task.clone());
            Ok(task)
        })?;

        tracing::info!(task_id = task.id, project_id, "Task created");
        Ok(task)
    }

    /// Shallow-merge `patch` into the task. `id`, `createdAt` and `projectId`
    /// are never overwritten.
    pub fn update_task(&self, id: Id, patch: &Map<String, Value>) -> Result<Task> {
        let task = self.write(|document| {
            let existing = document
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| StoreError::task_not_found(id))?;

            let merged: Task = merge(&*existing, patch, IMMUTABLE_FIELDS, "task")?;
            if !merged.is_valid() {
                return Err(StoreError::validation("Title and description must not be empty"));
            }
            *existing = merged.clone();
            Ok(merged)
        })?;

        tracing::info!(task_id = id, status = task.status.as_str(), "Task updated");
        Ok(task)
    }

    pub fn delete_task(&self, id: Id) -> Result<Task> {
        let task = self.write(|document| {
            let index = document
                .tasks
                .iter()
                .position(|task| task.id == id)
                .ok_or_else(|| StoreError::task_not_found(id))?;
            Ok(document.tasks.remove(index))
        })?;

        tracing::info!(task_id = id, "Task deleted");
        Ok(task)
    }
}

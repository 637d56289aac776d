//! Import pipeline orchestrator
//!
//! Walks the source account top-down (projects, sections, tasks, comments),
//! creating each destination entity only after its parent exists. Calls are
//! issued one at a time and never retried.
//!
//! Errors from the clients abort the run; entities created so far are kept.
//! A create call that returns no entity skips only that record's subtree.

use std::time::Instant;

use tasklift_import_types::{
    check_limits, DestinationClient, EntityId, ImportResult, QuotaCategory, QuotaSnapshot,
    SourceClient, SourceComment, SourceProject, SourceSection, SourceTask, TeamId, TeamProject,
};
use tracing::{debug, info, warn};

use super::{EntityCounts, ImportOutcome};
use crate::identifier_map::IdentifierMap;
use crate::mapper::{map_comment, map_project, map_section, map_task, sort_comments};

/// State shared by every stage of one run
struct RunContext {
    team_id: TeamId,
    acting_member: EntityId,
    quota: QuotaSnapshot,
}

/// State scoped to one imported project's subtree
struct ProjectScope {
    source_id: String,
    project_id: EntityId,
    sections: IdentifierMap,
}

/// Record the team's open projects as `projects_open` usage and return the
/// number of source projects that will be created open
///
/// The projection checked against the cap is the sum of the two.
pub fn record_open_projects(
    quota: &mut QuotaSnapshot,
    source: &[SourceProject],
    existing: &[TeamProject],
) -> usize {
    let active = existing.iter().filter(|p| p.is_active()).count();
    quota.record_usage(QuotaCategory::ProjectsOpen, active);
    source.iter().filter(|p| p.kind.is_public()).count()
}

/// One-shot import from a source client into a destination team
pub struct ImportPipeline<'a> {
    source: &'a dyn SourceClient,
    destination: &'a dyn DestinationClient,
    team_id: TeamId,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(
        source: &'a dyn SourceClient,
        destination: &'a dyn DestinationClient,
        team_id: TeamId,
    ) -> Self {
        Self {
            source,
            destination,
            team_id,
        }
    }

    /// Run the import to completion or to the first fatal error
    pub async fn run(&self) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        info!(
            "Importing from {} into {} team {}",
            self.source.platform(),
            self.destination.platform(),
            self.team_id
        );

        let quota = self.destination.team_limits(&self.team_id).await?;
        let acting_member = self.destination.current_member(&self.team_id).await?;
        debug!("Acting member: {}", acting_member);

        let mut run = RunContext {
            team_id: self.team_id.clone(),
            acting_member,
            quota,
        };
        let mut outcome = ImportOutcome::default();

        self.import_projects(&mut run, &mut outcome).await?;

        outcome.duration_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Import finished in {:.2}s: {} projects, {} sections, {} tasks, {} comments created",
            outcome.duration_seconds,
            outcome.projects.created,
            outcome.sections.created,
            outcome.tasks.created,
            outcome.comments.created
        );
        Ok(outcome)
    }

    async fn import_projects(
        &self,
        run: &mut RunContext,
        outcome: &mut ImportOutcome,
    ) -> ImportResult<()> {
        let projects: Vec<SourceProject> = self
            .source
            .list_projects()
            .await?
            .iter()
            .map(SourceProject::from)
            .collect();
        let existing = self.destination.team_projects(&run.team_id).await?;

        let incoming_open = record_open_projects(&mut run.quota, &projects, &existing);
        info!(
            "Found {} source projects ({} open after import)",
            projects.len(),
            run.quota.projected(QuotaCategory::ProjectsOpen, incoming_open)
        );
        check_limits(&run.quota, QuotaCategory::ProjectsOpen, incoming_open)?;

        for project in &projects {
            let payload = map_project(project, &run.team_id);
            let created = self
                .destination
                .create_project(&payload)
                .await?
                .and_then(|p| p.id.non_empty());

            let Some(project_id) = created else {
                warn!(
                    "Project '{}' ({}) was not created, skipping its sections and tasks",
                    project.name, project.external_id
                );
                outcome.projects.skipped += 1;
                continue;
            };

            debug!("Project {} -> {}", project.external_id, project_id);
            outcome.projects.created += 1;

            let mut scope = ProjectScope {
                source_id: project.external_id.clone(),
                project_id,
                sections: IdentifierMap::new(),
            };
            self.import_sections(run, &mut scope, &mut outcome.sections)
                .await?;
            self.import_tasks(run, &scope, outcome).await?;
        }

        Ok(())
    }

    async fn import_sections(
        &self,
        run: &RunContext,
        scope: &mut ProjectScope,
        counts: &mut EntityCounts,
    ) -> ImportResult<()> {
        let sections: Vec<SourceSection> = self
            .source
            .list_sections(&scope.source_id)
            .await?
            .iter()
            .map(SourceSection::from)
            .collect();

        check_limits(&run.quota, QuotaCategory::ProjectSections, sections.len())?;

        for section in &sections {
            let payload = map_section(section, &scope.project_id);
            let created = self
                .destination
                .create_section(&payload)
                .await?
                .and_then(|s| s.id.non_empty());

            match created {
                Some(section_id) => {
                    debug!("Section {} -> {}", section.external_id, section_id);
                    scope.sections.insert(section.external_id.clone(), section_id);
                    counts.created += 1;
                }
                None => {
                    warn!(
                        "Section '{}' ({}) was not created, its tasks will have no section",
                        section.title, section.external_id
                    );
                    counts.skipped += 1;
                }
            }
        }

        if !scope.sections.is_empty() {
            debug!(
                "Mapped {} of {} sections for project {}",
                scope.sections.len(),
                sections.len(),
                scope.project_id
            );
        }
        Ok(())
    }

    async fn import_tasks(
        &self,
        run: &RunContext,
        scope: &ProjectScope,
        outcome: &mut ImportOutcome,
    ) -> ImportResult<()> {
        let tasks: Vec<SourceTask> = self
            .source
            .list_tasks(&scope.source_id)
            .await?
            .iter()
            .map(SourceTask::from)
            .collect();
        debug!(
            "Importing {} tasks for project {}",
            tasks.len(),
            scope.project_id
        );

        for task in &tasks {
            let payload = map_task(task, &scope.project_id, &scope.sections, &run.acting_member);
            let created = self
                .destination
                .create_task(&payload)
                .await?
                .and_then(|t| t.id.non_empty());

            let Some(task_id) = created else {
                warn!(
                    "Task '{}' ({}) was not created, skipping its comments",
                    task.name, task.external_id
                );
                outcome.tasks.skipped += 1;
                continue;
            };

            outcome.tasks.created += 1;
            self.import_comments(&task.external_id, &task_id, &mut outcome.comments)
                .await?;
        }

        Ok(())
    }

    /// Comments are leaves: a failed create is logged and the next one proceeds
    async fn import_comments(
        &self,
        source_task_id: &str,
        task_id: &EntityId,
        counts: &mut EntityCounts,
    ) -> ImportResult<()> {
        let comments: Vec<SourceComment> = self
            .source
            .list_comments(source_task_id)
            .await?
            .iter()
            .map(SourceComment::from)
            .collect();

        for comment in sort_comments(comments) {
            let payload = map_comment(&comment, task_id);
            match self.destination.create_comment(&payload).await {
                Ok(Some(_)) => counts.created += 1,
                Ok(None) => {
                    debug!("Comment {} was not created", comment.external_id);
                    counts.skipped += 1;
                }
                Err(e) => {
                    warn!(
                        "Failed to create comment {} on task {}: {}",
                        comment.external_id, task_id, e
                    );
                    counts.skipped += 1;
                }
            }
        }

        Ok(())
    }
}

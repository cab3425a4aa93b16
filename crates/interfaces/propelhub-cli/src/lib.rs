pub mod commands;
pub mod token;

use clap::ValueEnum;
use propelhub_app_core::Workflow;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliWorkflow {
    Repo,
    Commit,
    Builds,
}

impl From<CliWorkflow> for Workflow {
    fn from(w: CliWorkflow) -> Self {
        match w {
            CliWorkflow::Repo => Workflow::Repo,
            CliWorkflow::Commit => Workflow::Commit,
            CliWorkflow::Builds => Workflow::Builds,
        }
    }
}

use anyhow::Result;
use tracing::info;

use informe_cli::config::LoadedConfig;
use informe_cli::pipeline::{
    DataSelection, FillRequest, inspect_document, run_fill_pipeline, token_report,
};
use informe_cli::summary::print_doctor_table;
use informe_cli::types::{FillOutcome, InspectReport, TokenReport};
use informe_core::ReportForm;

use crate::cli::{DataArgs, FillArgs, InspectArgs, TokensArgs};

pub fn run_fill(args: &FillArgs, loaded: &LoadedConfig) -> Result<FillOutcome> {
    let request = FillRequest {
        template: args.template.clone(),
        data: data_selection(&args.data),
        form: ReportForm {
            doctor: args.doctor.clone(),
            record_index: args.data.index,
            expedient: args.expedient.clone(),
            documentation_given: args.documentation_given.clone(),
            documentation_not_given: args.documentation_not_given.clone(),
        },
        output_dir: args.output_dir.clone(),
        render: !args.no_render,
    };
    let outcome = run_fill_pipeline(&request, &loaded.config)?;
    info!(
        document = %outcome.written.document.display(),
        rendered = outcome.written.rendering.is_some(),
        "report generated"
    );
    Ok(outcome)
}

pub fn run_tokens(args: &TokensArgs, loaded: &LoadedConfig) -> Result<TokenReport> {
    let selection = args.data.as_ref().map(|path| DataSelection {
        path: path.clone(),
        index: args.index,
        layout: args.layout.into(),
    });
    token_report(&args.template, selection.as_ref(), &loaded.config)
}

pub fn run_doctors(loaded: &LoadedConfig) {
    print_doctor_table(&loaded.config.doctors, &loaded.source);
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    inspect_document(&args.document)
}

fn data_selection(args: &DataArgs) -> DataSelection {
    DataSelection {
        path: args.data.clone(),
        index: args.index,
        layout: args.layout.into(),
    }
}

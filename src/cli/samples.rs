//! Generate sample values for an expression

use log::{Level, info, log_enabled};

use super::CliError;
use crate::{CompileOptions, SampleOptions, TypeTable, compile_with, parse, samples};

/// Options for the samples command
#[derive(Debug, Clone, Default)]
pub struct SamplesOptions {
    /// The value expression to enumerate
    pub expression: String,
    /// Type definitions substituted before parsing
    pub types: TypeTable,
    pub compile: CompileOptions,
    pub sample: SampleOptions,
}

/// Parse, compile and render sample values
pub fn execute_samples(options: &SamplesOptions) -> Result<Vec<String>, CliError> {
    let expression = if options.types.is_empty() {
        options.expression.clone()
    } else {
        options.types.expand(&options.expression)?.text
    };

    let node = parse(&expression)?;
    let compiled = compile_with(&node, &options.compile);

    if log_enabled!(Level::Info) {
        if let Some(size) = compiled.as_generator().and_then(|g| g.size()) {
            info!("'{}' describes {} values", options.expression, size);
        }
    }

    Ok(samples(&compiled, &options.sample))
}

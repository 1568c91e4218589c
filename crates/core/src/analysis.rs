//! Batch return-type analysis over a class index.

use crate::config::{AnalysisConfig, SigscopeConfig};
use crate::error::{Result, SigscopeError};
use rayon::prelude::*;
use sigscope_api::{ApiError, ApiResult, MethodReport, TypeName};
use sigscope_java::bytecode::{ClassIndex, ClassModel, MethodModel};
use sigscope_java::{Conventions, InMemoryClassIndex, ReturnTypeResolver};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub struct Analyzer {
    conventions: Conventions,
    options: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: &SigscopeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            conventions: config.conventions()?,
            options: config.analysis.clone(),
        })
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            options: AnalysisConfig::default(),
        }
    }

    pub fn options(&self) -> &AnalysisConfig {
        &self.options
    }

    fn resolver(&self) -> ReturnTypeResolver<'_> {
        ReturnTypeResolver::with_conventions(&self.conventions)
    }

    /// Report for a single method. `descriptor` disambiguates overloads; without
    /// it the first method with that name is used.
    pub fn analyze_method(
        &self,
        index: &dyn ClassIndex,
        class_name: &str,
        method_name: &str,
        descriptor: Option<&str>,
    ) -> ApiResult<MethodReport> {
        if method_name.is_empty() {
            return Err(ApiError::InvalidArgument("empty method name".to_string()));
        }
        if let Some(d) = descriptor.filter(|d| !d.starts_with('(')) {
            return Err(ApiError::InvalidArgument(format!("not a method descriptor: {}", d)));
        }
        let class = index
            .lookup(class_name)
            .ok_or_else(|| ApiError::NotFound(format!("class {}", class_name)))?;
        let method = class
            .methods
            .iter()
            .find(|m| m.name == method_name && descriptor.is_none_or(|d| m.descriptor == d))
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "method {}.{}{}",
                    class_name,
                    method_name,
                    descriptor.unwrap_or("")
                ))
            })?;
        Ok(self.report(class, method, index))
    }

    /// Reports for every selected method of `index`, ordered by class name and
    /// then declaration order.
    pub fn analyze_index(&self, index: &InMemoryClassIndex) -> Result<Vec<MethodReport>> {
        let started = Instant::now();

        let mut classes: Vec<&ClassModel> = index.classes().collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        let targets: Vec<(&ClassModel, &MethodModel)> = classes
            .into_iter()
            .flat_map(|class| class.methods.iter().map(move |method| (class, method)))
            .filter(|(_, method)| self.selects(method))
            .collect();

        let run = || -> Vec<MethodReport> {
            targets
                .par_iter()
                .map(|(class, method)| self.report(class, method, index))
                .collect()
        };
        let reports = match self.options.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| SigscopeError::Internal(e.to_string()))?
                .install(run),
            None => run(),
        };

        info!(
            "Analyzed {} methods in {} classes in {:?}",
            reports.len(),
            index.len(),
            started.elapsed()
        );
        Ok(reports)
    }

    fn selects(&self, method: &MethodModel) -> bool {
        if !self.options.include_synthetic && method.is_synthetic() {
            return false;
        }
        self.options.include_initializers || !method.name.starts_with('<')
    }

    fn report(
        &self,
        class: &ClassModel,
        method: &MethodModel,
        index: &dyn ClassIndex,
    ) -> MethodReport {
        let types = self.resolver().infer(method, index);
        debug!(
            "{}.{}{} -> {:?}",
            class.name,
            method.name,
            method.descriptor,
            types.to_strings()
        );
        MethodReport {
            class: TypeName::from_internal(&class.name).to_string(),
            method: method.name.clone(),
            descriptor: method.descriptor.clone(),
            types: types.to_strings(),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_conventions(Conventions::default())
    }
}

pub fn write_reports(path: &Path, reports: &[MethodReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json)?;
    info!("Wrote {} reports to {}", reports.len(), path.display());
    Ok(())
}

/// JSON schema of [`MethodReport`], for consumers of the report files.
pub fn report_schema() -> Result<String> {
    let schema = schemars::schema_for!(MethodReport);
    Ok(serde_json::to_string_pretty(&schema)?)
}

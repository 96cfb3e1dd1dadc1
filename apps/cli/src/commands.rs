use crate::args::Command;
use anyhow::Context;
use serde::Serialize;
use std::process::ExitCode;
use tforge::domain::feature::{Feature, RiskLevel};
use tforge::features::deployment::{ContractTemplate, Registry, SelectionSummary, TemplateCatalog, ValidationResult};
use tforge::features::management::{
    Capability, CheckStatus, ContractProfile, ContractScreen, ExecutionPlan, FunctionCategory, ManagementFunction,
    PreflightCheck, RiskAssessment, SecurityAnalysis, SecurityLevel,
    assess_function_risk, categorize_function, classify_function_risk, describe, describe_function,
    detect_capabilities, execution_warnings, format_function_name, local_preflight, scan_bytecode,
    should_block_execution,
};
use tracing::debug;

/// Exit code for an invalid selection, a blocked call or a high-risk contract.
const REJECTED: u8 = 2;

#[derive(Debug)]
pub(crate) struct Output {
    json: bool,
}

impl Output {
    pub(crate) const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as JSON, or the text lines produced by `text`.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> Vec<String>) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value).context("Serializing output")?);
        } else {
            for line in text() {
                println!("{line}");
            }
        }
        Ok(())
    }
}

pub(crate) fn run(
    command: Command,
    registry: &Registry,
    screen: &ContractScreen,
    out: &Output,
) -> anyhow::Result<ExitCode> {
    debug!(?command, "Running command");
    match command {
        Command::Features { category, standard } => {
            let features: Vec<&Feature> = registry
                .iter()
                .filter(|f| category.is_none_or(|c| f.category == c))
                .filter(|f| standard.is_none_or(|s| f.standards.supports(s)))
                .collect();
            out.emit(&features, || features.iter().map(|f| feature_line(f)).collect())?;
        },
        Command::Resolve { ids } => {
            let addable = registry.resolve(&ids);
            out.emit(&addable, || addable.iter().map(|f| feature_line(f)).collect())?;
        },
        Command::Validate { ids } => {
            let report = SelectionReport { validation: registry.validate(&ids), summary: registry.summarize(&ids) };
            out.emit(&report, || report.lines())?;
            if !report.validation.valid {
                return Ok(ExitCode::from(REJECTED));
            }
        },
        Command::Templates { standard } => {
            let catalog = TemplateCatalog::builtin();
            let templates: Vec<&ContractTemplate> =
                catalog.iter().filter(|t| standard.is_none_or(|s| t.standard == s)).collect();
            out.emit(&templates, || {
                templates
                    .iter()
                    .map(|t| format!("{:<20} {:<8} {:<13} {}", t.id, t.standard, t.complexity, t.name))
                    .collect()
            })?;
        },
        Command::Template { id } => {
            let catalog = TemplateCatalog::builtin();
            let template = catalog.get(&id)?;
            let report = TemplateReport {
                template,
                report: SelectionReport {
                    validation: template.validate(registry),
                    summary: registry.summarize(&template.features),
                },
            };
            out.emit(&report, || {
                let mut lines = vec![
                    format!("{} ({}, {})", template.name, template.standard, template.complexity),
                    template.description.clone(),
                    format!("features: {}", template.features.join(", ")),
                ];
                lines.extend(report.report.lines());
                lines
            })?;
        },
        Command::Classify { names } => {
            let classified: Vec<Classification> = names.iter().map(|n| Classification::of(n)).collect();
            out.emit(&classified, || {
                classified
                    .iter()
                    .map(|c| format!("{:<20} {:<10} {:<15} {}", c.function, c.risk_level, c.category, c.description))
                    .collect()
            })?;
        },
        Command::Scan { code } => {
            let code = match code.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path).with_context(|| format!("Reading bytecode from {path}"))?,
                None => code,
            };
            let report = ScanReport { functions: scan_bytecode(&code)?, capabilities: detect_capabilities(&code)? };
            out.emit(&report, || report.lines())?;
        },
        Command::Assess { function, args, gas, contract } => {
            let function = describe(&function)?;
            let plan = ExecutionPlan::new(contract, &function, args).with_gas_estimate(gas);
            let checks = local_preflight(&plan);
            let report = AssessReport {
                assessment: assess_function_risk(&function),
                blocked: should_block_execution(&checks),
                warnings: execution_warnings(&checks),
                function,
                checks,
            };
            out.emit(&report, || report.lines())?;
            if report.blocked {
                return Ok(ExitCode::from(REJECTED));
            }
        },
        Command::Analyze { address, allowance, name, symbol } => {
            let profile = ContractProfile { address, allowance, name, symbol };
            let analysis = screen.analyze(&profile);
            out.emit(&analysis, || analysis_lines(&analysis))?;
            if analysis.risk_level >= SecurityLevel::High {
                return Ok(ExitCode::from(REJECTED));
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn feature_line(feature: &Feature) -> String {
    format!("{:<18} {:<26} {:<11} {}", feature.id, feature.name, feature.category, feature.risk_level)
}

fn analysis_lines(analysis: &SecurityAnalysis) -> Vec<String> {
    let badge = analysis.badge();
    let mut lines = vec![format!("{} {} (score {})", badge.icon, badge.text, analysis.risk_score)];
    lines.extend(analysis.flags.iter().map(|f| format!("[{}] {}: {}", f.severity, f.message, f.details)));
    lines.push(analysis.recommendation.clone());
    lines
}

#[derive(Debug, Serialize)]
struct SelectionReport {
    #[serde(flatten)]
    validation: ValidationResult,
    summary: SelectionSummary,
}

impl SelectionReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![if self.validation.valid { "valid".to_owned() } else { "invalid".to_owned() }];
        lines.extend(self.validation.errors.iter().map(|e| format!("error: {e}")));
        lines.extend(self.validation.warnings.iter().map(|w| format!("warning: {w}")));
        lines.push(format!(
            "{} features, gas impact {}, complexity {}",
            self.summary.feature_count, self.summary.total_gas_impact, self.summary.total_complexity
        ));
        lines
    }
}

#[derive(Debug, Serialize)]
struct TemplateReport<'a> {
    template: &'a ContractTemplate,
    #[serde(flatten)]
    report: SelectionReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    function: String,
    name: String,
    risk_level: RiskLevel,
    category: FunctionCategory,
    description: String,
    known: bool,
}

impl Classification {
    fn of(function: &str) -> Self {
        describe(function).map_or_else(
            |_| Self {
                function: function.to_owned(),
                name: format_function_name(function),
                risk_level: classify_function_risk(function),
                category: categorize_function(function),
                description: describe_function(function),
                known: false,
            },
            |f| Self {
                function: function.to_owned(),
                name: f.name,
                risk_level: f.risk_level,
                category: f.category,
                description: f.description,
                known: true,
            },
        )
    }
}

#[derive(Debug, Serialize)]
struct ScanReport {
    functions: Vec<ManagementFunction>,
    capabilities: Vec<Capability>,
}

impl ScanReport {
    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .functions
            .iter()
            .map(|f| format!("{} {:<28} {:<10} {}", f.selector, f.signature, f.risk_level, f.name))
            .collect();
        let capabilities: Vec<&str> = self.capabilities.iter().map(AsRef::as_ref).collect();
        if capabilities.is_empty() {
            lines.push("capabilities: none".to_owned());
        } else {
            lines.push(format!("capabilities: {}", capabilities.join(", ")));
        }
        lines
    }
}

#[derive(Debug, Serialize)]
struct AssessReport {
    function: ManagementFunction,
    assessment: RiskAssessment,
    checks: Vec<PreflightCheck>,
    blocked: bool,
    warnings: Vec<String>,
}

impl AssessReport {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} [{}] {}", self.function.signature, self.assessment.risk_level, self.assessment.warning_message),
            format!("confirmation: {}", self.assessment.confirmation_type),
        ];
        lines.extend(self.assessment.preflight_checks.iter().map(|c| format!("  - {c}")));
        lines.extend(self.checks.iter().map(|c| {
            let mark = match c.status {
                CheckStatus::Passed => "ok",
                CheckStatus::Warning => "warn",
                CheckStatus::Failed => "FAIL",
                CheckStatus::Pending => "..",
            };
            format!("[{mark}] {}: {}", c.name, c.message)
        }));
        if self.blocked {
            lines.push("execution blocked".to_owned());
        }
        lines
    }
}

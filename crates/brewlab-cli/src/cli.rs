//! Command handlers for the CLI.
//!
//! Each handler converts clap arguments into core parameters, calls the
//! [`CoffeeLab`] and renders the markdown result. Creates and updates are
//! pushed to the sync endpoint afterwards when one is configured; a failed
//! push is logged and never fails the command.

use std::{fs, time::Duration};

use anyhow::{Context, Result, anyhow};
use brewlab_core::{
    Beans, BrewParams, CoffeeLab, CreateResult, DeleteResult, Grinders, LabError,
    OperationStatus, Records, UpdateResult,
    calculator::cumulative_from_incremental,
    display::number,
    models::{BrewMethod, BrewStyle},
    params::{Delete, Id, InsertStep, ListBeans, UpdateMethod, WaterPlanRequest},
};
use jiff::Zoned;
use log::{info, warn};

use crate::{
    args::{
        BeanCommands, CalcCommands, GrinderCommands, MethodCommands, RecordCommands,
        StepCommands, SyncCommands, TimerArgs,
    },
    renderer::TerminalRenderer,
    timer,
};

pub struct Cli {
    lab: CoffeeLab,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(lab: CoffeeLab, renderer: TerminalRenderer) -> Self {
        Self { lab, renderer }
    }

    fn render(&self, output: impl ToString) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    /// Log the outcome of an automatic push.
    ///
    /// A `false` push is silent when sync is not configured and a warning
    /// when the endpoint turned the entity down.
    async fn report_push(&self, kind: &str, result: brewlab_core::Result<bool>) {
        match result {
            Ok(true) => info!("Pushed {kind} to sync endpoint"),
            Ok(false) => {
                if let Ok(Some(url)) = self.lab.sync_url().await {
                    warn!("Sync endpoint {url} did not accept the {kind}");
                }
            }
            Err(e) => warn!("Failed to push {kind}: {e}"),
        }
    }

    async fn push_method(&self, method: &BrewMethod) {
        self.report_push("method", self.lab.push_method(method).await).await;
    }

    pub async fn list_methods(&self) -> Result<()> {
        let summaries = self
            .lab
            .list_method_summaries()
            .await
            .context("Failed to list methods")?;
        self.render(summaries)
    }

    pub async fn handle_method_command(&self, command: MethodCommands) -> Result<()> {
        match command {
            MethodCommands::Create(args) => {
                let method = self
                    .lab
                    .create_method(&args.into())
                    .await
                    .context("Failed to create method")?;
                self.push_method(&method).await;
                self.render(CreateResult::new(method))
            }
            MethodCommands::List => self.list_methods().await,
            MethodCommands::Show(args) => {
                let id = Id { id: args.id };
                match args.dose {
                    Some(dose) => {
                        let plan = self
                            .lab
                            .water_plan(&WaterPlanRequest {
                                method_id: args.id,
                                dose,
                            })
                            .await?;
                        self.render(plan)
                    }
                    None => {
                        let method = self.lab.require_method(&id).await?;
                        self.render(method)
                    }
                }
            }
            MethodCommands::Update(args) => {
                let params: UpdateMethod = args.into();
                let method = self
                    .lab
                    .update_method(&params)
                    .await
                    .context("Failed to update method")?
                    .ok_or(LabError::MethodNotFound { id: params.id })?;
                self.push_method(&method).await;
                self.render(UpdateResult::with_changes(method, params.changes()))
            }
            MethodCommands::Delete(args) => {
                let params: Delete = args.into();
                match self.lab.delete_method(&params).await? {
                    Some(method) => self.render(DeleteResult::new(method)),
                    None => Err(LabError::MethodNotFound { id: params.id }.into()),
                }
            }
            MethodCommands::Export(args) => {
                let exported = self.lab.export_method(&Id { id: args.id }).await?;
                let path = args.output.join(&exported.file_name);
                fs::write(&path, exported.json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                self.render(OperationStatus::success(format!(
                    "Exported method to {}",
                    path.display()
                )))
            }
            MethodCommands::Import(args) => {
                let json = fs::read_to_string(&args.file)
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                let method = self
                    .lab
                    .import_method(&json)
                    .await
                    .context("Failed to import method")?;
                self.push_method(&method).await;
                self.render(CreateResult::new(method))
            }
            MethodCommands::Share(args) => {
                let link = self.lab.share_method(&Id { id: args.id }, &args.base).await?;
                println!("{link}");
                Ok(())
            }
            MethodCommands::ImportLink(args) => {
                let method = self
                    .lab
                    .import_share_link(&args.link)
                    .await
                    .context("Failed to import share link")?;
                self.push_method(&method).await;
                self.render(CreateResult::new(method))
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        let (method, message) = match command {
            StepCommands::Add(args) => {
                let params: InsertStep = args.into();
                let name = params.step.name.clone();
                let method = self
                    .lab
                    .insert_step(&params)
                    .await
                    .context("Failed to add step")?;
                let index = method.steps.len().saturating_sub(1);
                (method, format!("Added step '{name}' at index {index}"))
            }
            StepCommands::Insert(args) => {
                let params: InsertStep = args.into();
                let name = params.step.name.clone();
                let index = params.position.unwrap_or_default();
                let method = self
                    .lab
                    .insert_step(&params)
                    .await
                    .context("Failed to insert step")?;
                (method, format!("Inserted step '{name}' at index {index}"))
            }
            StepCommands::Remove(args) => {
                let index = args.index;
                let method = self
                    .lab
                    .remove_step(&args.into())
                    .await
                    .context("Failed to remove step")?;
                (method, format!("Removed step {index}"))
            }
            StepCommands::Incremental(args) => {
                let (index, increment) = (args.index, args.increment);
                let method = self
                    .lab
                    .set_incremental_ratio(&args.into())
                    .await
                    .context("Failed to set incremental ratio")?;
                (
                    method,
                    format!("Step {index} now adds ×{}", number(increment)),
                )
            }
            StepCommands::Mode(args) => {
                let index = args.index;
                let method = self
                    .lab
                    .switch_step_mode(&args.into())
                    .await
                    .context("Failed to switch step mode")?;
                let target = method
                    .steps
                    .get(index)
                    .map(|step| step.target.to_string())
                    .unwrap_or_default();
                (method, format!("Step {index} target is now {target}"))
            }
        };

        self.push_method(&method).await;
        self.render(OperationStatus::success(message))?;
        println!();
        self.render(method)
    }

    pub async fn handle_bean_command(&self, command: BeanCommands) -> Result<()> {
        match command {
            BeanCommands::Add(args) => {
                let today = Zoned::now().date();
                let bean = self
                    .lab
                    .create_bean(&args.into_params(today))
                    .await
                    .context("Failed to add bean")?;
                self.report_push("bean", self.lab.push_bean(&bean).await).await;
                self.render(CreateResult::new(bean))
            }
            BeanCommands::List(args) => {
                let params: ListBeans = args.into();
                let beans = self.lab.list_beans(&params).await?;
                self.render(Beans(beans))
            }
            BeanCommands::Show(args) => {
                let id = args.id;
                let bean = self
                    .lab
                    .get_bean(&args.into())
                    .await?
                    .ok_or(LabError::BeanNotFound { id })?;
                self.render(bean)
            }
            BeanCommands::Update(args) => {
                let id = args.id;
                let bean = self
                    .lab
                    .update_bean(&args.into())
                    .await
                    .context("Failed to update bean")?
                    .ok_or(LabError::BeanNotFound { id })?;
                self.report_push("bean", self.lab.push_bean(&bean).await).await;
                self.render(UpdateResult::new(bean))
            }
            BeanCommands::Delete(args) => {
                let params: Delete = args.into();
                match self.lab.delete_bean(&params).await? {
                    Some(bean) => self.render(DeleteResult::new(bean)),
                    None => Err(LabError::BeanNotFound { id: params.id }.into()),
                }
            }
        }
    }

    pub async fn handle_grinder_command(&self, command: GrinderCommands) -> Result<()> {
        match command {
            GrinderCommands::Add(args) => {
                let grinder = self
                    .lab
                    .create_grinder(&args.into())
                    .await
                    .context("Failed to add grinder")?;
                self.report_push("grinder", self.lab.push_grinder(&grinder).await).await;
                self.render(CreateResult::new(grinder))
            }
            GrinderCommands::List => {
                let grinders = self.lab.list_grinders().await?;
                self.render(Grinders(grinders))
            }
            GrinderCommands::Show(args) => {
                let id = args.id;
                let grinder = self
                    .lab
                    .get_grinder(&args.into())
                    .await?
                    .ok_or(LabError::GrinderNotFound { id })?;
                self.render(grinder)
            }
            GrinderCommands::Update(args) => {
                let id = args.id;
                let grinder = self
                    .lab
                    .update_grinder(&args.into())
                    .await
                    .context("Failed to update grinder")?
                    .ok_or(LabError::GrinderNotFound { id })?;
                self.report_push("grinder", self.lab.push_grinder(&grinder).await).await;
                self.render(UpdateResult::new(grinder))
            }
            GrinderCommands::Delete(args) => {
                let params: Delete = args.into();
                match self.lab.delete_grinder(&params).await? {
                    Some(grinder) => self.render(DeleteResult::new(grinder)),
                    None => Err(LabError::GrinderNotFound { id: params.id }.into()),
                }
            }
            GrinderCommands::Ranges(args) => {
                let grinder = match args.id {
                    Some(id) => self
                        .lab
                        .get_grinder(&Id { id })
                        .await?
                        .ok_or(LabError::GrinderNotFound { id })?,
                    None => self
                        .lab
                        .default_grinder()
                        .await?
                        .ok_or_else(|| anyhow!("No grinders configured"))?,
                };
                let style = BrewStyle::from(args.style);
                let status = match grinder.range_for(style) {
                    Some((low, high)) => OperationStatus::success(format!(
                        "{} for {}: {} - {}",
                        grinder.name,
                        style.label(),
                        number(low),
                        number(high)
                    )),
                    None => OperationStatus::warning(format!(
                        "{} has no recommended range for {}",
                        grinder.name,
                        style.label()
                    )),
                };
                self.render(status)
            }
        }
    }

    pub async fn handle_record_command(&self, command: RecordCommands) -> Result<()> {
        match command {
            RecordCommands::Log(args) => {
                let record = self
                    .lab
                    .log_brew(&args.into())
                    .await
                    .context("Failed to log brew")?;
                self.report_push("brew record", self.lab.push_record(&record).await).await;
                self.render(CreateResult::new(record))
            }
            RecordCommands::List(args) => {
                let records = self.lab.list_records(args.limit).await?;
                self.render(Records(records))
            }
            RecordCommands::Show(args) => {
                let id = args.id;
                let record = self
                    .lab
                    .get_record(&args.into())
                    .await?
                    .ok_or(LabError::RecordNotFound { id })?;
                self.render(record)
            }
        }
    }

    pub async fn handle_calc_command(&self, command: CalcCommands) -> Result<()> {
        match command {
            CalcCommands::Cumulative(args) => {
                let totals: Vec<String> = cumulative_from_incremental(&args.values)
                    .into_iter()
                    .map(number)
                    .collect();
                self.render(format!("{}\n", totals.join(" → ")))
            }
            CalcCommands::Suggest(args) => {
                let params = match (args.method, args.roast) {
                    (Some(id), _) => {
                        let method = self.lab.require_method(&Id { id }).await?;
                        BrewParams::for_method(&method, args.dose)
                    }
                    (None, Some(roast)) => BrewParams::for_roast(args.dose, roast.into()),
                    (None, None) => BrewParams::for_roast(args.dose, Default::default()),
                };
                self.render(params)
            }
        }
    }

    pub async fn run_timer(&self, args: TimerArgs) -> Result<()> {
        let plan = self.lab.water_plan(&(&args).into()).await?;
        self.render(&plan)?;
        println!();
        timer::run(&plan, Duration::from_millis(args.tick_ms), &self.renderer).await?;
        Ok(())
    }

    pub async fn handle_sync_command(&self, command: SyncCommands) -> Result<()> {
        match command {
            SyncCommands::SetUrl(args) => {
                self.lab
                    .set_sync_url(&args.url)
                    .await
                    .context("Failed to save sync URL")?;
                self.render(OperationStatus::success("Sync URL saved"))
            }
            SyncCommands::Clear => {
                let status = if self.lab.clear_sync_url().await? {
                    OperationStatus::success("Sync URL cleared")
                } else {
                    OperationStatus::warning("No sync URL was set")
                };
                self.render(status)
            }
            SyncCommands::Status => {
                let status = match self.lab.sync_url().await? {
                    Some(url) => OperationStatus::success(format!("Syncing with {url}")),
                    None => OperationStatus::warning("Sync is not configured"),
                };
                self.render(status)
            }
            SyncCommands::Push => {
                let report = self.lab.push_all().await.context("Push failed")?;
                self.render(report)
            }
            SyncCommands::Pull => match self.lab.pull().await.context("Pull failed")? {
                Some(report) => self.render(report),
                None => self.render(OperationStatus::failure(
                    "Could not read from the sync endpoint",
                )),
            },
        }
    }
}

//! Brew method operations: CRUD, water plans, export and import.

use super::CoffeeLab;
use crate::{
    calculator::WaterPlan,
    display::MethodSummaries,
    error::{LabError, Result},
    export,
    models::{BrewMethod, MethodSummary},
    params::{CreateMethod, Delete, Id, UpdateMethod, WaterPlanRequest},
};

/// A method serialized for export, with the file name it should be saved as.
#[derive(Debug, Clone)]
pub struct ExportedMethod {
    pub file_name: String,
    pub json: String,
}

impl CoffeeLab {
    /// Creates a new method.
    pub async fn create_method(&self, params: &CreateMethod) -> Result<BrewMethod> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| db.create_method(&params)).await
    }

    /// Retrieves a method with its steps.
    pub async fn get_method(&self, params: &Id) -> Result<Option<BrewMethod>> {
        let id = params.id;
        self.with_db(move |db| db.get_method(id)).await
    }

    /// Retrieves a method, failing with `MethodNotFound` when it is missing.
    pub async fn require_method(&self, params: &Id) -> Result<BrewMethod> {
        self.get_method(params)
            .await?
            .ok_or(LabError::MethodNotFound { id: params.id })
    }

    /// Lists all methods, newest first.
    pub async fn list_methods(&self) -> Result<Vec<BrewMethod>> {
        self.with_db(|db| db.list_methods()).await
    }

    /// Lists methods as summaries for list views.
    pub async fn list_method_summaries(&self) -> Result<MethodSummaries> {
        let methods = self.list_methods().await?;
        let summaries: Vec<MethodSummary> = methods.iter().map(Into::into).collect();
        Ok(MethodSummaries(summaries))
    }

    /// Applies partial changes to a method. Returns `None` if it does not
    /// exist.
    pub async fn update_method(&self, params: &UpdateMethod) -> Result<Option<BrewMethod>> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| db.update_method(&params)).await
    }

    /// Permanently deletes a method and its steps.
    ///
    /// Requires `confirmed`; returns the deleted method, or `None` if it did
    /// not exist.
    pub async fn delete_method(&self, params: &Delete) -> Result<Option<BrewMethod>> {
        params.ensure_confirmed()?;
        let id = params.id;
        self.with_db(move |db| db.delete_method(id)).await
    }

    /// Resolves a method's step targets against a dose.
    pub async fn water_plan(&self, params: &WaterPlanRequest) -> Result<WaterPlan> {
        let method = self.require_method(&Id { id: params.method_id }).await?;
        Ok(WaterPlan::new(method, params.dose))
    }

    /// Serializes a method for export.
    pub async fn export_method(&self, params: &Id) -> Result<ExportedMethod> {
        let method = self.require_method(params).await?;
        Ok(ExportedMethod {
            file_name: export::export_file_name(&method),
            json: export::method_to_json(&method)?,
        })
    }

    /// Imports a method document under a fresh ID.
    pub async fn import_method(&self, json: &str) -> Result<BrewMethod> {
        let method = export::method_from_json(json)?;
        self.store_imported(method).await
    }

    /// Builds a share link for a method.
    pub async fn share_method(&self, params: &Id, base: &str) -> Result<String> {
        let method = self.require_method(params).await?;
        export::share_link(&method, base)
    }

    /// Imports the method carried by a share link (or its bare payload).
    pub async fn import_share_link(&self, link: &str) -> Result<BrewMethod> {
        let method = export::parse_share_link(link).ok_or_else(|| {
            LabError::invalid_input("link").with_reason("Not a valid method share link")
        })?;
        self.store_imported(method).await
    }

    async fn store_imported(&self, method: BrewMethod) -> Result<BrewMethod> {
        let stored = method.clone();
        self.with_db(move |db| db.insert_method(&stored)).await?;
        Ok(method)
    }
}

//! Bean and grinder catalog operations.

use super::CoffeeLab;
use crate::{
    error::Result,
    models::{BeanFilter, CoffeeBean, GrinderProfile},
    params::{CreateBean, CreateGrinder, Delete, Id, ListBeans, UpdateBean, UpdateGrinder},
};

impl CoffeeLab {
    /// Adds a bean to the catalog.
    pub async fn create_bean(&self, params: &CreateBean) -> Result<CoffeeBean> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| db.create_bean(&params)).await
    }

    pub async fn get_bean(&self, params: &Id) -> Result<Option<CoffeeBean>> {
        let id = params.id;
        self.with_db(move |db| db.get_bean(id)).await
    }

    /// Lists beans, most recently purchased first.
    pub async fn list_beans(&self, params: &ListBeans) -> Result<Vec<CoffeeBean>> {
        let filter = if params.active_only {
            BeanFilter::active()
        } else {
            BeanFilter::default()
        };
        self.with_db(move |db| db.list_beans(Some(&filter))).await
    }

    pub async fn update_bean(&self, params: &UpdateBean) -> Result<Option<CoffeeBean>> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| db.update_bean(&params)).await
    }

    /// Permanently deletes a bean. Requires `confirmed`.
    pub async fn delete_bean(&self, params: &Delete) -> Result<Option<CoffeeBean>> {
        params.ensure_confirmed()?;
        let id = params.id;
        self.with_db(move |db| db.delete_bean(id)).await
    }

    /// Adds a grinder profile.
    pub async fn create_grinder(&self, params: &CreateGrinder) -> Result<GrinderProfile> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| db.create_grinder(&params)).await
    }

    pub async fn get_grinder(&self, params: &Id) -> Result<Option<GrinderProfile>> {
        let id = params.id;
        self.with_db(move |db| db.get_grinder(id)).await
    }

    pub async fn list_grinders(&self) -> Result<Vec<GrinderProfile>> {
        self.with_db(|db| db.list_grinders()).await
    }

    pub async fn update_grinder(&self, params: &UpdateGrinder) -> Result<Option<GrinderProfile>> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| db.update_grinder(&params)).await
    }

    /// Permanently deletes a grinder profile. Requires `confirmed`.
    pub async fn delete_grinder(&self, params: &Delete) -> Result<Option<GrinderProfile>> {
        params.ensure_confirmed()?;
        let id = params.id;
        self.with_db(move |db| db.delete_grinder(id)).await
    }

    /// The grinder to preselect: a Timemore if there is one, else the first.
    pub async fn default_grinder(&self) -> Result<Option<GrinderProfile>> {
        let grinders = self.list_grinders().await?;
        let preferred = grinders.iter().position(GrinderProfile::is_preferred);
        Ok(match preferred {
            Some(index) => grinders.into_iter().nth(index),
            None => grinders.into_iter().next(),
        })
    }
}

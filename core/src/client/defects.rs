use super::ApiClient;
use crate::model::{Criticality, Defect, DefectCount, DefectTypes};
use crate::Result;
use chrono::NaiveDateTime;
use reqwest::Method;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Criteria for `/defect_info/filtered`. Unset fields mean "all"; an unset
/// period bound falls back to the server's default (epoch / now).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefectFilter {
    pub defect_type: Option<String>,
    pub criticality: Option<Criticality>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DefectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, defect_type: impl Into<String>) -> Self {
        self.defect_type = Some(defect_type.into());
        self
    }

    pub fn with_criticality(mut self, criticality: Criticality) -> Self {
        self.criticality = Some(criticality);
        self
    }

    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            (
                "defect_type",
                self.defect_type.clone().unwrap_or_else(|| "all".into()),
            ),
            (
                "criticality",
                self.criticality
                    .map_or_else(|| "all".into(), |c| c.as_str().to_string()),
            ),
        ];
        if let Some(start) = self.start {
            query.push(("start_datetime", start.format(TIME_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            query.push(("end_datetime", end.format(TIME_FORMAT).to_string()));
        }
        query
    }
}

/// `/defect_info`: detected defects and their history
pub struct DefectService<'a> {
    client: &'a ApiClient,
}

impl<'a> DefectService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every defect, ordered by id
    pub async fn all(&self) -> Result<Vec<Defect>> {
        self.client.get_json("/defect_info/all").await
    }

    pub async fn count(&self) -> Result<DefectCount> {
        self.client.get_json("/defect_info/count").await
    }

    pub async fn by_id(&self, id: i64) -> Result<Defect> {
        self.client.get_json(&format!("/defect_info/id={id}")).await
    }

    pub async fn of_type(&self, defect_type: &str) -> Result<Vec<Defect>> {
        self.client
            .get_json(&format!("/defect_info/type={defect_type}"))
            .await
    }

    pub async fn critical(&self) -> Result<Vec<Defect>> {
        self.client.get_json("/defect_info/critical").await
    }

    pub async fn extreme(&self) -> Result<Vec<Defect>> {
        self.client.get_json("/defect_info/extreme").await
    }

    pub async fn by_period(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Defect>> {
        let builder = self
            .client
            .request(Method::GET, "/defect_info/by_period")
            .query(&[
                ("start_datetime", start.format(TIME_FORMAT).to_string()),
                ("end_datetime", end.format(TIME_FORMAT).to_string()),
            ]);
        self.client.send_json(builder).await
    }

    pub async fn filtered(&self, filter: &DefectFilter) -> Result<Vec<Defect>> {
        let builder = self
            .client
            .request(Method::GET, "/defect_info/filtered")
            .query(&filter.query());
        self.client.send_json(builder).await
    }

    pub async fn all_types(&self) -> Result<DefectTypes> {
        self.client.get_json("/defect_info/all_types").await
    }

    /// The variation this defect evolved from
    pub async fn previous(&self, id: i64) -> Result<Defect> {
        self.client
            .get_json(&format!("/defect_info/id={id}/previous"))
            .await
    }

    /// All earlier variations, newest first; empty when there are none
    pub async fn chain_of_previous(&self, id: i64) -> Result<Vec<Defect>> {
        self.client
            .get_json(&format!("/defect_info/id={id}/chain_of_previous"))
            .await
    }

    pub async fn set_criticality(&self, id: i64, criticality: Criticality) -> Result<Defect> {
        let (is_extreme, is_critical) = criticality.flags();
        let builder = self
            .client
            .request(Method::PUT, &format!("/defect_info/id={id}/set_criticality"))
            .query(&[("is_extreme", is_extreme), ("is_critical", is_critical)]);
        self.client.send_json(builder).await
    }

    /// Remove a defect; the server returns the deleted record
    pub async fn delete(&self, id: i64) -> Result<Defect> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("/defect_info/id={id}/delete"));
        self.client.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_filter_asks_for_everything() {
        let query = DefectFilter::new().query();
        assert_eq!(
            query,
            vec![
                ("defect_type", "all".to_string()),
                ("criticality", "all".to_string())
            ]
        );
    }

    #[test]
    fn filter_with_period() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let filter = DefectFilter::new()
            .of_type("rupture")
            .with_criticality(Criticality::Critical)
            .between(
                day.and_hms_opt(0, 0, 0).unwrap(),
                day.and_hms_opt(23, 59, 59).unwrap(),
            );
        let query = filter.query();
        assert_eq!(query[0].1, "rupture");
        assert_eq!(query[1].1, "critical");
        assert_eq!(query[2], ("start_datetime", "2024-06-01T00:00:00".to_string()));
        assert_eq!(query[3], ("end_datetime", "2024-06-01T23:59:59".to_string()));
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}
"#;

#[derive(Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
    pub variables: ContributionVariables<'a>,
}

#[derive(Serialize)]
pub struct ContributionVariables<'a> {
    pub username: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ContributionsData {
    pub user: Option<ContributionsUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub contribution_count: u32,
    pub date: NaiveDate,
}

impl ContributionCalendar {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_response() {
        let raw = r#"{"data": {"user": {"contributionsCollection": {"contributionCalendar": {
            "totalContributions": 7,
            "weeks": [
                {"contributionDays": [{"contributionCount": 3, "date": "2024-03-10"}]},
                {"contributionDays": [{"contributionCount": 0, "date": "2024-03-11"},
                                      {"contributionCount": 4, "date": "2024-03-12"}]}
            ]}}}}}"#;
        let response: GraphQLResponse<ContributionsData> = serde_json::from_str(raw).unwrap();
        assert!(response.errors.is_none());

        let calendar = response
            .data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection.contribution_calendar)
            .unwrap();
        assert_eq!(calendar.total_contributions, 7);
        assert_eq!(calendar.days().count(), 3);
        assert_eq!(calendar.days().map(|d| d.contribution_count).sum::<u32>(), 7);
    }

    #[test]
    fn test_parse_error_response() {
        let raw = r#"{"data": null, "errors": [{"message": "Could not resolve to a User"}]}"#;
        let response: GraphQLResponse<ContributionsData> = serde_json::from_str(raw).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors.unwrap()[0].message, "Could not resolve to a User");
    }
}

//! Forms for games, offers, tasks and integrations

use super::{others, record_id, require_min, require_text, RecordForm};
use rewards_admin_core::{
    parse_calendar_day, Game, Integration, Offer, Task, TaskType, ValidationErrors,
};
use rewards_admin_networking::api::MasterData;

fn clean_list(values: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !cleaned.iter().any(|c| c.eq_ignore_ascii_case(value)) {
            cleaned.push(value.to_string());
        }
    }
    cleaned
}

/// Report targeting values the lookup tables do not know about
fn check_targeting(
    errors: &mut ValidationErrors,
    master: &MasterData,
    provider: &str,
    countries: &[String],
    tiers: &[String],
    segments: &[String],
) {
    if !provider.is_empty() && !master.has_provider(provider) {
        errors.add("sdkProvider", format!("Unknown SDK provider: {provider}"));
    }
    if let Some(code) = countries.iter().find(|c| !master.has_country(c)) {
        errors.add("countries", format!("Unknown country: {code}"));
    }
    if let Some(tier) = tiers.iter().find(|t| !master.has_tier(t)) {
        errors.add("tiers", format!("Unknown tier: {tier}"));
    }
    if let Some(segment) = segments.iter().find(|s| !master.has_segment(s)) {
        errors.add("segments", format!("Unknown segment: {segment}"));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameForm {
    pub id: Option<String>,
    pub name: String,
    pub sdk_provider: String,
    pub category: String,
    pub countries: Vec<String>,
    pub tiers: Vec<String>,
    pub segments: Vec<String>,
    pub creatives: Vec<String>,
    pub coin_reward: Option<u32>,
    pub xp_reward: Option<u32>,
    pub active: bool,
    pub sort_order: u32,
}

impl Default for GameForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            sdk_provider: String::new(),
            category: String::new(),
            countries: Vec::new(),
            tiers: Vec::new(),
            segments: Vec::new(),
            creatives: Vec::new(),
            coin_reward: None,
            xp_reward: None,
            active: true,
            sort_order: 0,
        }
    }
}

impl GameForm {
    pub fn from_record(game: &Game) -> Self {
        Self {
            id: Some(game.id.clone()),
            name: game.name.clone(),
            sdk_provider: game.sdk_provider.clone(),
            category: game.category.clone(),
            countries: game.countries.clone(),
            tiers: game.tiers.clone(),
            segments: game.segments.clone(),
            creatives: game.creatives.clone(),
            coin_reward: Some(game.coin_reward),
            xp_reward: Some(game.xp_reward),
            active: game.active,
            sort_order: game.sort_order,
        }
    }

    /// Validate, also checking targeting against the lookup tables when loaded
    pub fn validate_with(
        &self,
        existing: &[Game],
        master: Option<&MasterData>,
    ) -> Result<Game, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = require_text(&mut errors, "name", "Game name", &self.name);
        let sdk_provider =
            require_text(&mut errors, "sdkProvider", "SDK provider", &self.sdk_provider);
        if !name.is_empty()
            && others(existing, self.editing_id()).any(|g| {
                g.name.eq_ignore_ascii_case(&name)
                    && g.sdk_provider.eq_ignore_ascii_case(&sdk_provider)
            })
        {
            errors.add("name", format!("{name} is already listed for {sdk_provider}"));
        }

        let countries = clean_list(&self.countries);
        let tiers = clean_list(&self.tiers);
        let segments = clean_list(&self.segments);
        let creatives = clean_list(&self.creatives);
        if let Some(bad) = creatives
            .iter()
            .find(|url| !(url.starts_with("http://") || url.starts_with("https://")))
        {
            errors.add("creatives", format!("Creative must be an http(s) URL: {bad}"));
        }

        if let Some(master) = master {
            check_targeting(&mut errors, master, &sdk_provider, &countries, &tiers, &segments);
        }

        errors.into_result()?;
        Ok(Game {
            id: record_id(&self.id),
            name,
            sdk_provider,
            category: self.category.trim().to_string(),
            countries,
            tiers,
            segments,
            creatives,
            coin_reward: self.coin_reward.unwrap_or(0),
            xp_reward: self.xp_reward.unwrap_or(0),
            active: self.active,
            sort_order: self.sort_order,
        })
    }
}

impl RecordForm for GameForm {
    type Record = Game;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, existing: &[Game]) -> Result<Game, ValidationErrors> {
        self.validate_with(existing, None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferForm {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub game_id: Option<String>,
    pub sdk_provider: String,
    pub payout: Option<u32>,
    pub countries: Vec<String>,
    pub tiers: Vec<String>,
    /// Raw date inputs; blank means open-ended
    pub start_date: String,
    pub end_date: String,
    pub active: bool,
}

impl Default for OfferForm {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            game_id: None,
            sdk_provider: String::new(),
            payout: None,
            countries: Vec::new(),
            tiers: Vec::new(),
            start_date: String::new(),
            end_date: String::new(),
            active: true,
        }
    }
}

impl OfferForm {
    pub fn from_record(offer: &Offer) -> Self {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(rewards_admin_core::date_key).unwrap_or_default()
        };
        Self {
            id: Some(offer.id.clone()),
            title: offer.title.clone(),
            description: offer.description.clone(),
            game_id: offer.game_id.clone(),
            sdk_provider: offer.sdk_provider.clone(),
            payout: Some(offer.payout),
            countries: offer.countries.clone(),
            tiers: offer.tiers.clone(),
            start_date: date(offer.start_date),
            end_date: date(offer.end_date),
            active: offer.active,
        }
    }

    /// Validate, also checking the game link and targeting when lookups are loaded
    pub fn validate_with(
        &self,
        existing: &[Offer],
        games: Option<&[Game]>,
        master: Option<&MasterData>,
    ) -> Result<Offer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = require_text(&mut errors, "title", "Offer title", &self.title);
        let sdk_provider = self.sdk_provider.trim().to_string();
        let payout = require_min(&mut errors, "payout", "Payout", self.payout, 1);

        let mut date_field = |field: &str, raw: &str| {
            if raw.trim().is_empty() {
                return None;
            }
            let parsed = parse_calendar_day(raw);
            if parsed.is_none() {
                errors.add(field, format!("Unrecognised date: {}", raw.trim()));
            }
            parsed
        };
        let start_date = date_field("startDate", &self.start_date);
        let end_date = date_field("endDate", &self.end_date);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.add("endDate", "End date must be on or after the start date");
            }
        }

        let game_id = self
            .game_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if let (Some(id), Some(games)) = (&game_id, games) {
            if !games.iter().any(|g| &g.id == id) {
                errors.add("gameId", format!("Unknown game: {id}"));
            }
        }

        let countries = clean_list(&self.countries);
        let tiers = clean_list(&self.tiers);
        if let Some(master) = master {
            check_targeting(&mut errors, master, &sdk_provider, &countries, &tiers, &[]);
        }

        if !title.is_empty()
            && others(existing, self.editing_id()).any(|o| {
                o.title.eq_ignore_ascii_case(&title) && o.game_id == game_id
            })
        {
            errors.add("title", format!("Offer {title} already exists"));
        }

        errors.into_result()?;
        Ok(Offer {
            id: record_id(&self.id),
            title,
            description: self.description.trim().to_string(),
            game_id,
            sdk_provider,
            payout,
            countries,
            tiers,
            start_date,
            end_date,
            active: self.active,
        })
    }
}

impl RecordForm for OfferForm {
    type Record = Offer;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, existing: &[Offer]) -> Result<Offer, ValidationErrors> {
        self.validate_with(existing, None, None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub target_count: Option<u32>,
    pub coin_reward: Option<u32>,
    pub xp_reward: Option<u32>,
    pub active: bool,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            task_type: TaskType::Daily,
            target_count: Some(1),
            coin_reward: None,
            xp_reward: None,
            active: true,
        }
    }
}

impl TaskForm {
    pub fn from_record(task: &Task) -> Self {
        Self {
            id: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            task_type: task.task_type,
            target_count: Some(task.target_count),
            coin_reward: Some(task.coin_reward),
            xp_reward: Some(task.xp_reward),
            active: task.active,
        }
    }
}

impl RecordForm for TaskForm {
    type Record = Task;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, _existing: &[Task]) -> Result<Task, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = require_text(&mut errors, "title", "Task title", &self.title);
        let target_count =
            require_min(&mut errors, "targetCount", "Target count", self.target_count, 1);
        let coin_reward = self.coin_reward.unwrap_or(0);
        let xp_reward = self.xp_reward.unwrap_or(0);
        if coin_reward == 0 && xp_reward == 0 {
            errors.set_form("A task must reward coins or XP");
        }

        errors.into_result()?;
        Ok(Task {
            id: record_id(&self.id),
            title,
            description: self.description.trim().to_string(),
            task_type: self.task_type,
            target_count,
            coin_reward,
            xp_reward,
            active: self.active,
        })
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct IntegrationForm {
    pub id: Option<String>,
    pub provider: String,
    pub display_name: String,
    pub app_id: String,
    pub api_key: String,
    pub secret: Option<String>,
    pub enabled: bool,
}

impl std::fmt::Debug for IntegrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationForm")
            .field("id", &self.id)
            .field("provider", &self.provider)
            .field("app_id", &self.app_id)
            .field("api_key", &rewards_admin_core::mask(&self.api_key))
            .finish_non_exhaustive()
    }
}

impl IntegrationForm {
    pub fn from_record(integration: &Integration) -> Self {
        Self {
            id: Some(integration.id.clone()),
            provider: integration.provider.clone(),
            display_name: integration.display_name.clone(),
            app_id: integration.app_id.clone(),
            api_key: integration.api_key.clone(),
            secret: integration.secret.clone(),
            enabled: integration.enabled,
        }
    }
}

impl RecordForm for IntegrationForm {
    type Record = Integration;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, existing: &[Integration]) -> Result<Integration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let provider = require_text(&mut errors, "provider", "Provider", &self.provider);
        let app_id = require_text(&mut errors, "appId", "App id", &self.app_id);
        let api_key = require_text(&mut errors, "apiKey", "API key", &self.api_key);
        if !provider.is_empty()
            && others(existing, self.editing_id())
                .any(|i| i.provider.eq_ignore_ascii_case(&provider))
        {
            errors.add("provider", format!("{provider} is already configured"));
        }

        errors.into_result()?;
        let display_name = match self.display_name.trim() {
            "" => provider.clone(),
            name => name.to_string(),
        };
        Ok(Integration {
            id: record_id(&self.id),
            provider,
            display_name,
            app_id,
            api_key,
            secret: self
                .secret
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            enabled: self.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_core::{Country, SdkProvider, Segment, Tier};

    fn master() -> MasterData {
        MasterData {
            countries: vec![Country {
                code: "US".into(),
                name: "United States".into(),
            }],
            tiers: vec![Tier {
                id: "t1".into(),
                name: "Gold".into(),
                rank: 1,
            }],
            segments: vec![Segment {
                id: "s1".into(),
                name: "Whales".into(),
            }],
            sdk_providers: vec![SdkProvider {
                id: "gp".into(),
                name: "GamePix".into(),
                kind: "games".into(),
            }],
        }
    }

    #[test]
    fn test_game_targeting_checked_against_master_data() {
        let form = GameForm {
            name: "Puzzle Rush".into(),
            sdk_provider: "GamePix".into(),
            countries: vec!["us".into(), "US".into(), "FR".into()],
            tiers: vec!["gold".into()],
            creatives: vec!["ftp://banner.png".into()],
            ..Default::default()
        };
        let errors = form.validate_with(&[], Some(&master())).unwrap_err();
        assert_eq!(errors.field("countries"), Some("Unknown country: FR"));
        assert_eq!(errors.field("tiers"), None);
        assert!(errors.field("creatives").is_some());

        // Without lookups only local checks run
        let mut ok = form.clone();
        ok.creatives = vec!["https://cdn.example.com/banner.png".into()];
        let game = ok.validate(&[]).unwrap();
        assert_eq!(game.countries, vec!["us", "FR"]);
    }

    #[test]
    fn test_offer_dates_and_game_link() {
        let games = vec![Game {
            id: "g1".into(),
            ..GameForm {
                name: "Rush".into(),
                sdk_provider: "GamePix".into(),
                ..Default::default()
            }
            .validate(&[])
            .unwrap()
        }];
        let form = OfferForm {
            title: "Install".into(),
            payout: Some(0),
            game_id: Some("g2".into()),
            start_date: "2025-03-10".into(),
            end_date: "2025-03-01".into(),
            ..Default::default()
        };
        let errors = form.validate_with(&[], Some(&games), None).unwrap_err();
        assert_eq!(errors.field("payout"), Some("Payout must be at least 1"));
        assert_eq!(errors.field("gameId"), Some("Unknown game: g2"));
        assert_eq!(
            errors.field("endDate"),
            Some("End date must be on or after the start date")
        );

        let open_ended = OfferForm {
            title: "Survey".into(),
            payout: Some(40),
            start_date: "2025-03-01T00:00:00Z".into(),
            ..Default::default()
        };
        let offer = open_ended.validate(&[]).unwrap();
        assert!(offer.end_date.is_none());
        assert!(offer.runs_on(chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }

    #[test]
    fn test_task_requires_target_and_reward() {
        let form = TaskForm {
            title: "Play 3 games".into(),
            target_count: Some(0),
            ..Default::default()
        };
        let errors = form.validate(&[]).unwrap_err();
        assert_eq!(errors.field("targetCount"), Some("Target count must be at least 1"));
        assert_eq!(errors.form(), Some("A task must reward coins or XP"));
    }

    #[test]
    fn test_integration_provider_unique_and_debug_masked() {
        let existing = IntegrationForm {
            provider: "Tapjoy".into(),
            app_id: "app".into(),
            api_key: "key-1234567".into(),
            ..Default::default()
        }
        .validate(&[])
        .unwrap();
        assert_eq!(existing.display_name, "Tapjoy");

        let duplicate = IntegrationForm {
            provider: "tapjoy".into(),
            app_id: "other".into(),
            api_key: "another-key".into(),
            ..Default::default()
        };
        let errors = duplicate.validate(&[existing]).unwrap_err();
        assert_eq!(errors.field("provider"), Some("tapjoy is already configured"));
        assert!(!format!("{duplicate:?}").contains("another-key"));
    }
}

//! Game, offer and task endpoints beyond plain CRUD

use super::resource::member_path;
use crate::{AdminClient, Resource};
use rewards_admin_core::{Game, Offer, Result};
use serde_json::json;
use tracing::{debug, info};

/// Fetch the games served by one SDK provider
pub async fn list_games_by_provider(client: &AdminClient, provider: &str) -> Result<Vec<Game>> {
    let games: Vec<Game> = client
        .get_with_query(Game::PATH, &[("provider", provider)])
        .await?;
    debug!("Fetched {} games for provider {}", games.len(), provider);
    Ok(games)
}

/// Fetch the offers attached to a game
pub async fn list_offers_for_game(client: &AdminClient, game_id: &str) -> Result<Vec<Offer>> {
    let offers: Vec<Offer> = client
        .get_with_query(Offer::PATH, &[("gameId", game_id)])
        .await?;
    debug!("Fetched {} offers for game {}", offers.len(), game_id);
    Ok(offers)
}

/// Flip the `active` flag of any catalog record
pub async fn set_active<R: Resource>(client: &AdminClient, id: &str, active: bool) -> Result<R> {
    let path = format!("{}/status", member_path::<R>(id)?);
    let updated: R = client.patch(&path, &json!({ "active": active })).await?;
    info!("{} {} active={}", R::LABEL, id, active);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use axum::{
        extract::{Path, Query},
        routing::{get, patch},
        Json, Router,
    };
    use rewards_admin_core::Task;
    use serde_json::Value;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_games_by_provider() {
        let router = Router::new().route(
            "/admin/game-offers/games",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let provider = q.get("provider").cloned().unwrap_or_default();
                Json(json!([{"_id": 1, "name": "Merge Mania", "sdkProvider": provider}]))
            }),
        );
        let base = test_server::spawn(router).await;
        let client = test_server::client(&base);

        let games = list_games_by_provider(&client, "gamezop").await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].sdk_provider, "gamezop");
    }

    #[tokio::test]
    async fn test_set_active_on_task() {
        let router = Router::new().route(
            "/admin/tasks/{id}/status",
            patch(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({"data": {
                    "id": id,
                    "title": "Open the app",
                    "taskType": "daily",
                    "targetCount": 1,
                    "active": body["active"]
                }}))
            }),
        );
        let base = test_server::spawn(router).await;
        let client = test_server::client(&base);

        let task: Task = set_active(&client, "t7", true).await.unwrap();
        assert_eq!(task.id, "t7");
        assert!(task.active);
    }
}

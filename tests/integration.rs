//! Full-run integration: seed documents in, merged documents out, with both
//! providers served by a mock HTTP server.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gameday_sync::config::{
    AppConfig, MonitoringConfig, ProviderConfig, SeasonConfig, Secrets, StoreConfig, TeamConfig,
};
use gameday_sync::pipeline::Pipeline;

fn test_config(server_uri: &str, data_dir: &Path) -> AppConfig {
    AppConfig {
        team: TeamConfig {
            espn_id: "59".to_string(),
            name: "Georgia Tech".to_string(),
            conference_group_id: "1".to_string(),
        },
        season: SeasonConfig { year: 2026 },
        providers: ProviderConfig {
            espn_base_url: server_uri.to_string(),
            cfbd_base_url: server_uri.to_string(),
        },
        store: StoreConfig {
            data_dir: data_dir.to_path_buf(),
        },
        monitoring: MonitoringConfig {
            log_level: "info".to_string(),
        },
    }
}

fn write_seed_documents(dir: &Path) {
    let schedule = json!({
        "games": [{
            "id": "wake-forest",
            "opponent": "Wake Forest",
            "opponentId": "wake-forest",
            "date": "2026-09-05",
            "venue": null,
            "home": true,
            "conference": true,
            "result": null,
            "gtScore": null,
            "oppScore": null,
            "scorePrediction": "GT 28-21",
            "matchupSummary": "Conference opener at home."
        }]
    });
    let opponents = json!({
        "opponents": [{
            "id": "wake-forest",
            "name": "Wake Forest",
            "record": null,
            "ranking": null,
            "topPlayers": [
                {"name": "Placeholder Back", "position": "RB", "note": ""}
            ]
        }]
    });
    let roster = json!({
        "positionGroups": [{
            "group": "Quarterbacks",
            "abbr": "QB",
            "players": [{
                "name": "Haynes King",
                "number": "",
                "position": "QB",
                "year": "",
                "depth": 1,
                "note": "Returning starter."
            }]
        }]
    });

    fs::write(dir.join("schedule.json"), schedule.to_string()).unwrap();
    fs::write(dir.join("opponents.json"), opponents.to_string()).unwrap();
    fs::write(dir.join("roster.json"), roster.to_string()).unwrap();
}

async fn mount_providers(server: &MockServer) {
    // Season schedule: one completed home win over Wake Forest.
    Mock::given(method("GET"))
        .and(path("/teams/59/schedule"))
        .and(query_param("season", "2026"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{
                "id": "401520100",
                "date": "2026-09-05T23:30Z",
                "competitions": [{
                    "competitors": [
                        {"id": "59", "homeAway": "home", "score": "31",
                         "team": {"id": "59", "displayName": "Georgia Tech Yellow Jackets"}},
                        {"id": "154", "homeAway": "away", "score": "24",
                         "team": {"id": "154", "displayName": "Wake Forest University"}}
                    ],
                    "venue": {"fullName": "Bobby Dodd Stadium"},
                    "status": {"type": {"completed": true}}
                }]
            }]
        })))
        .mount(server)
        .await;

    // Win probabilities.
    Mock::given(method("GET"))
        .and(path("/metrics/wp/pregame"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "homeTeam": "Georgia Tech",
            "awayTeam": "Wake Forest",
            "homeWinProb": 0.666,
            "awayWinProb": 0.334
        }])))
        .mount(server)
        .await;

    // Opponent summary for Wake Forest (espn id stamped by the merge).
    Mock::given(method("GET"))
        .and(path("/teams/154"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "team": {
                "record": {"items": [{
                    "type": "total",
                    "stats": [
                        {"name": "wins", "value": 7.0},
                        {"name": "losses", "value": 2.0}
                    ]
                }]},
                "rank": 19
            }
        })))
        .mount(server)
        .await;

    // Opponent roster: upgrades the placeholder top-player list.
    Mock::given(method("GET"))
        .and(path("/teams/154/roster"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "athletes": [{"items": [{
                "displayName": "Demond Claiborne",
                "position": {"abbreviation": "RB"},
                "description": "All-ACC back."
            }]}]
        })))
        .mount(server)
        .await;

    // Our roster: fills in jersey number and class year.
    Mock::given(method("GET"))
        .and(path("/teams/59/roster"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "athletes": [{"items": [{
                "displayName": "Haynes King",
                "jersey": "10",
                "position": {"abbreviation": "QB"},
                "experience": {"displayValue": "Sr"}
            }]}]
        })))
        .mount(server)
        .await;

    // AP poll.
    Mock::given(method("GET"))
        .and(path("/rankings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rankings": [{
                "name": "Associated Press Top 25",
                "shortName": "AP Top 25",
                "ranks": [{
                    "current": 1,
                    "team": {"id": "333", "displayName": "Alabama Crimson Tide"},
                    "recordSummary": "9-0",
                    "points": 1550.0
                }]
            }]
        })))
        .mount(server)
        .await;

    // Conference standings: Clemson ahead of Georgia Tech on conference pct.
    Mock::given(method("GET"))
        .and(path("/standings"))
        .and(query_param("group", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "children": [{
                "standings": {"entries": [
                    {"team": {"id": "59", "displayName": "Georgia Tech Yellow Jackets"},
                     "stats": [
                        {"name": "wins", "type": "total", "value": 7.0},
                        {"name": "losses", "type": "total", "value": 2.0},
                        {"name": "wins", "type": "conf", "value": 4.0},
                        {"name": "losses", "type": "conf", "value": 2.0}
                     ]},
                    {"team": {"id": "228", "displayName": "Clemson Tigers"},
                     "stats": [
                        {"name": "wins", "type": "total", "value": 8.0},
                        {"name": "losses", "type": "total", "value": 1.0},
                        {"name": "wins", "type": "conf", "value": 5.0},
                        {"name": "losses", "type": "conf", "value": 0.0}
                     ]}
                ]}
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_run_reconciles_all_documents() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_seed_documents(dir.path());
    mount_providers(&server).await;

    let config = test_config(&server.uri(), dir.path());
    let secrets = Secrets {
        cfbd_api_key: Some("test-key".to_string()),
    };

    Pipeline::new(config, &secrets)
        .run(Utc::now())
        .await
        .expect("run should succeed");

    // Schedule: merged result + probability, curated fields intact.
    let schedule: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("schedule.json")).unwrap())
            .unwrap();
    let game = &schedule["games"][0];
    assert_eq!(game["result"], "W");
    assert_eq!(game["gtScore"], 31);
    assert_eq!(game["oppScore"], 24);
    assert_eq!(game["venue"], "Bobby Dodd Stadium");
    assert_eq!(game["gtWinProbability"], 67);
    assert_eq!(game["scorePrediction"], "GT 28-21");
    assert_eq!(game["matchupSummary"], "Conference opener at home.");
    assert_eq!(game["_espnId"], "401520100");
    assert_eq!(game["_opponentEspnId"], "154");
    assert!(schedule["lastUpdated"].is_string());

    // Opponents: record, ranking, backfilled id, upgraded top players.
    let opponents: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("opponents.json")).unwrap())
            .unwrap();
    let opp = &opponents["opponents"][0];
    assert_eq!(opp["espnId"], "154");
    assert_eq!(opp["record"]["wins"], 7);
    assert_eq!(opp["record"]["losses"], 2);
    assert_eq!(opp["ranking"], 19);
    assert_eq!(opp["topPlayers"][0]["name"], "Demond Claiborne");
    assert_eq!(opp["topPlayers"][0]["note"], "All-ACC back.");

    // Roster: overlaid number/year, curated note kept.
    let roster: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("roster.json")).unwrap())
            .unwrap();
    let player = &roster["positionGroups"][0]["players"][0];
    assert_eq!(player["number"], "10");
    assert_eq!(player["year"], "Sr");
    assert_eq!(player["depth"], 1);
    assert_eq!(player["note"], "Returning starter.");

    // Standings: AP poll present, conference table sorted by pct.
    let standings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("standings.json")).unwrap())
            .unwrap();
    assert_eq!(standings["apPoll"][0]["team"], "Alabama Crimson Tide");
    assert_eq!(standings["accStandings"][0]["team"], "Clemson Tigers");
    assert_eq!(standings["accStandings"][0]["pct"], 1.0);
    assert_eq!(standings["accStandings"][1]["team"], "Georgia Tech Yellow Jackets");
}

#[tokio::test]
async fn provider_outage_keeps_curated_documents_intact() {
    // Every provider call fails; the run still completes and the curated
    // content comes through unchanged.
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_seed_documents(dir.path());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let secrets = Secrets { cfbd_api_key: None };

    Pipeline::new(config, &secrets)
        .run(Utc::now())
        .await
        .expect("run should absorb provider failures");

    let schedule: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("schedule.json")).unwrap())
            .unwrap();
    let game = &schedule["games"][0];
    assert_eq!(game["result"], serde_json::Value::Null);
    assert_eq!(game["scorePrediction"], "GT 28-21");
    assert!(game.get("_espnId").is_none());

    let opponents: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("opponents.json")).unwrap())
            .unwrap();
    assert_eq!(opponents["opponents"][0]["record"], serde_json::Value::Null);
}

#[tokio::test]
async fn missing_seed_schedule_is_fatal() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    // No seed documents at all.

    let config = test_config(&server.uri(), dir.path());
    let secrets = Secrets { cfbd_api_key: None };

    let err = Pipeline::new(config, &secrets)
        .run(Utc::now())
        .await
        .expect_err("run should abort");
    assert!(err.to_string().contains("schedule.json"));

    // Nothing was written.
    assert!(!dir.path().join("standings.json").exists());
}

use pokebase::pokemon::{self, Type};
use pokebase::session::{self, Session};
use pokebase::{Concurrency, Error, Gathered, Locale, hydrate};

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use futures_util::StreamExt;
use serde_json::json;
use std::collections::HashMap;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind fixture server");
    let address = listener.local_addr().expect("Fixture server address");

    let _ = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Serve fixtures");
    });

    format!("http://{address}")
}

fn session(url: &str) -> Session {
    Session::new(session::Options {
        pokeapi_url: url.to_owned(),
        pokemon_tcg_url: url.to_owned(),
        ..session::Options::default()
    })
    .expect("Build session")
}

async fn list() -> impl IntoResponse {
    axum::Json(json!({
        "count": 1302,
        "next": null,
        "previous": null,
        "results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "broken", "url": "https://pokeapi.co/api/v2/pokemon/broken/"},
            {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"},
            {"name": "squirtle", "url": "https://pokeapi.co/api/v2/pokemon/7/"}
        ]
    }))
}

async fn detail(Path(id): Path<u32>) -> axum::response::Response {
    let (name, kind) = match id {
        1 => ("bulbasaur", "grass"),
        7 => ("squirtle", "water"),
        _ => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    axum::Json(json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": [{"slot": 1, "type": {"name": kind, "url": ""}}],
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}}
        ]
    }))
    .into_response()
}

async fn species(Path(id): Path<u32>) -> impl IntoResponse {
    axum::Json(json!({
        "id": id,
        "name": "bulbasaur",
        "flavor_text_entries": [
            {
                "flavor_text": "A strange seed was\nplanted on its back.",
                "language": {"name": "en", "url": ""},
                "version": {"name": "red", "url": ""}
            }
        ]
    }))
}

fn pokeapi() -> Router {
    Router::new()
        .route("/pokemon", get(list))
        .route("/pokemon/{id}/", get(detail))
        .route("/pokemon-species/{id}/", get(species))
}

#[tokio::test]
async fn list_keeps_entries_with_numeric_identifiers() {
    let url = serve(pokeapi()).await;
    let session = session(&url);

    let summaries = session.pokeapi.list(10).await.expect("List Pokémon");
    let ids: Vec<_> = summaries.iter().map(|summary| summary.id.get()).collect();

    assert_eq!(ids, vec![1, 4, 7]);
    assert_eq!(summaries[0].name, "bulbasaur");
    assert_eq!(summaries[0].image_url, pokemon::artwork_url(pokemon::Id::new(1)));
}

#[tokio::test]
async fn list_sends_limit() {
    let router = Router::new().route(
        "/pokemon",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            assert_eq!(query.get("limit").map(String::as_str), Some("151"));

            axum::Json(json!({"count": 0, "next": null, "previous": null, "results": []}))
        }),
    );

    let url = serve(router).await;
    let summaries = session(&url).pokeapi.list(151).await.expect("List Pokémon");

    assert!(summaries.is_empty());
}

#[tokio::test]
async fn server_errors_are_bad_responses() {
    let router = Router::new().route(
        "/pokemon",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );

    let url = serve(router).await;
    let error = session(&url).pokeapi.list(10).await.expect_err("List must fail");

    assert!(matches!(
        error,
        Error::BadResponse(status) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert!(!error.is_unreachable());
}

#[tokio::test]
async fn unexpected_payloads_are_invalid() {
    let router = Router::new().route(
        "/pokemon/{id}/",
        get(|| async { axum::Json(json!({"unexpected": true})) }),
    );

    let url = serve(router).await;
    let error = session(&url)
        .pokeapi
        .pokemon(pokemon::Id::new(1))
        .await
        .expect_err("Decoding must fail");

    assert!(matches!(error, Error::InvalidPayload(_)));
}

#[tokio::test]
async fn closed_ports_are_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind");
    let address = listener.local_addr().expect("Address");
    drop(listener);

    let error = session(&format!("http://{address}"))
        .pokeapi
        .list(10)
        .await
        .expect_err("Connection must fail");

    assert!(error.is_unreachable());
}

#[tokio::test]
async fn details_and_species_are_decoded() {
    let url = serve(pokeapi()).await;
    let session = session(&url);

    let bulbasaur = session
        .pokeapi
        .pokemon(pokemon::Id::new(1))
        .await
        .expect("Fetch Pokémon");

    assert_eq!(bulbasaur.name, "bulbasaur");
    assert_eq!(bulbasaur.types, vec![Type::Grass]);
    assert_eq!(bulbasaur.stats.hp, 45);
    assert_eq!(bulbasaur.stats.attack, 49);
    assert_eq!(bulbasaur.stats.speed, 0);

    let species = session
        .pokeapi
        .species(pokemon::Id::new(1), &Locale::new("en"))
        .await
        .expect("Fetch species");

    assert_eq!(species.flavor_text, "A strange seed was planted on its back.");
}

#[tokio::test]
async fn hydration_survives_individual_failures() {
    let url = serve(pokeapi()).await;
    let session = session(&url);

    let summaries = session.pokeapi.list(10).await.expect("List Pokémon");

    let details = hydrate::details(&session.pokeapi, &summaries, Concurrency::Unbounded);
    let mut details = std::pin::pin!(details);
    let mut gathered = Gathered::new();

    while let Some(result) = details.next().await {
        let _ = gathered.record(result);
    }

    gathered.successes.sort_by_key(|pokemon| pokemon.id);
    let ids: Vec<_> = gathered.successes.iter().map(|pokemon| pokemon.id.get()).collect();

    assert_eq!(ids, vec![1, 7]);
    assert_eq!(gathered.failures, 1);
}

#[tokio::test]
async fn cards_are_searched_by_name() {
    let router = Router::new().route(
        "/cards",
        get(
            |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query.get("q").map(String::as_str), Some("name:pikachu"));
                assert_eq!(
                    headers.get("x-api-key").and_then(|key| key.to_str().ok()),
                    Some("secret")
                );

                axum::Json(json!({
                    "data": [{
                        "id": "base1-58",
                        "name": "Pikachu",
                        "set": {"id": "base1", "name": "Base"},
                        "images": {"small": "https://images.pokemontcg.io/base1/58.png"}
                    }]
                }))
            },
        ),
    );

    let url = serve(router).await;
    let session = Session::new(session::Options {
        pokemon_tcg_url: url,
        pokemon_tcg_api_key: Some("secret".to_owned()),
        ..session::Options::default()
    })
    .expect("Build session");

    let cards = session.pokemon_tcg.search("pikachu").await.expect("Search cards");

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id.as_str(), "base1-58");
    assert_eq!(cards[0].set, "Base");
    assert_eq!(cards[0].image_url, "https://images.pokemontcg.io/base1/58.png");
}

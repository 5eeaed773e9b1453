//! Hydration of catalog entries into full [`Pokemon`] records.
use crate::gather::{self, Concurrency};
use crate::pokemon::Summary;
use crate::{Pokemon, Result, Source};

use futures_util::Stream;

/// Fetches the details of every valid summary concurrently, yielding each
/// result as soon as it completes.
///
/// The stream is unordered. Callers wanting a stable order must sort once it
/// is exhausted.
pub fn details<'a, S>(
    source: &'a S,
    summaries: &[Summary],
    concurrency: Concurrency,
) -> impl Stream<Item = Result<Pokemon>> + use<'a, S>
where
    S: Source,
{
    let ids: Vec<_> = summaries
        .iter()
        .map(|summary| summary.id)
        .filter(|id| id.is_valid())
        .collect();

    log::info!(
        "Hydrating {} entries (concurrency: {concurrency})",
        ids.len()
    );

    gather::unordered(ids.into_iter().map(move |id| source.pokemon(id)), concurrency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{self, Stats};
    use crate::{Error, Gathered, Locale, Species};

    use futures_util::StreamExt;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::time::Duration;
    use tokio::time;

    struct Fake {
        requested: RefCell<Vec<pokemon::Id>>,
    }

    impl Source for Fake {
        async fn list(&self, _limit: usize) -> Result<Vec<Summary>> {
            Ok(Vec::new())
        }

        async fn pokemon(&self, id: pokemon::Id) -> Result<Pokemon> {
            self.requested.borrow_mut().push(id);

            // Higher identifiers complete first
            time::sleep(Duration::from_millis(50 - u64::from(id.get()) * 5)).await;

            if id.get() == 4 {
                return Err(Error::BadResponse(StatusCode::NOT_FOUND));
            }

            Ok(Pokemon {
                id,
                name: format!("pokemon-{id}"),
                image_url: pokemon::artwork_url(id),
                height: 1,
                weight: 1,
                types: Vec::new(),
                stats: Stats::default(),
            })
        }

        async fn species(&self, id: pokemon::Id, _locale: &Locale) -> Result<Species> {
            Ok(Species {
                id,
                flavor_text: String::new(),
            })
        }
    }

    fn summary(id: u32) -> Summary {
        let id = pokemon::Id::new(id);

        Summary {
            id,
            name: format!("pokemon-{id}"),
            image_url: pokemon::artwork_url(id),
        }
    }

    #[tokio::test]
    async fn invalid_identifiers_are_skipped() {
        let source = Fake {
            requested: RefCell::new(Vec::new()),
        };

        let summaries = [summary(0), summary(1), summary(7)];
        let results: Vec<_> = details(&source, &summaries, Concurrency::Unbounded)
            .collect()
            .await;

        assert_eq!(results.len(), 2);

        let mut requested = source.requested.take();
        requested.sort();

        assert_eq!(requested, vec![pokemon::Id::new(1), pokemon::Id::new(7)]);
    }

    #[tokio::test]
    async fn details_complete_out_of_order_and_tolerate_failures() {
        let source = Fake {
            requested: RefCell::new(Vec::new()),
        };

        let summaries = [summary(1), summary(4), summary(7)];
        let mut gathered = Gathered::new();

        let stream = details(&source, &summaries, Concurrency::Unbounded);
        let mut stream = std::pin::pin!(stream);

        while let Some(result) = stream.next().await {
            let _ = gathered.record(result);
        }

        let arrival: Vec<_> = gathered.successes.iter().map(|pokemon| pokemon.id.get()).collect();
        assert_eq!(arrival, vec![7, 1]);
        assert_eq!(gathered.failures, 1);
    }
}

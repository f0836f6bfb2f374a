// Recommendations endpoint
use super::client::SpotifyClient;
use super::errors::CatalogResult;
use super::{RecommendationFilters, SeedSpec};
use crate::models::{RecommendationsResponse, Track};

impl SpotifyClient {
    pub async fn fetch_recommendations(
        &self,
        token: &str,
        seeds: &SeedSpec,
        filters: &RecommendationFilters,
    ) -> CatalogResult<Vec<Track>> {
        let mut query: Vec<(&str, String)> = Vec::with_capacity(5);
        if !seeds.tracks.is_empty() {
            query.push(("seed_tracks", seeds.tracks.join(",")));
        }
        if !seeds.artists.is_empty() {
            query.push(("seed_artists", seeds.artists.join(",")));
        }
        query.push(("limit", filters.limit.to_string()));
        query.push(("market", filters.market.clone()));
        query.push(("min_popularity", filters.min_popularity.to_string()));

        log::debug!(
            "[Recommendations] Requesting {} tracks from {} seed(s), market {}",
            filters.limit,
            seeds.total(),
            filters.market
        );

        let request = self.get("/recommendations", token).query(&query);
        let response: RecommendationsResponse =
            self.send_json(request, "Recommendations").await?;

        Ok(response.tracks.into_iter().map(Track::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::test_server::serve;
    use super::*;

    #[tokio::test]
    async fn encodes_seeds_and_filters() {
        let (base, seen) = serve(vec![(200, r#"{"tracks":[]}"#)]);
        let client = SpotifyClient::with_base_url(base);
        let seeds = SeedSpec {
            tracks: vec!["t1".into(), "t2".into()],
            artists: vec!["a1".into()],
        };
        let filters = RecommendationFilters {
            limit: 50,
            market: "US".into(),
            min_popularity: 20,
        };

        let tracks = client
            .fetch_recommendations("tok", &seeds, &filters)
            .await
            .unwrap();
        assert!(tracks.is_empty());

        let url = seen.recv().unwrap().url;
        assert!(url.contains("seed_tracks=t1%2Ct2"));
        assert!(url.contains("seed_artists=a1"));
        assert!(url.contains("limit=50"));
        assert!(url.contains("market=US"));
        assert!(url.contains("min_popularity=20"));
    }
}

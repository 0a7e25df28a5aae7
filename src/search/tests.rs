use std::sync::Arc;

use super::*;
use crate::catalog::{Catalog, CatalogItem, EmbeddingMatrix};
use crate::encoder::{EncoderAdapter, EncodingError, MockJointEncoder, MockVisualEncoder, QueryVectors};
use crate::scoring::{MockTextScorer, ScoringError, TextPairScorer};

fn item(id: u64, title: &str) -> CatalogItem {
    CatalogItem {
        id,
        title: title.to_string(),
        sub_category: "Topwear".to_string(),
        colour: "Blue".to_string(),
        usage: "Casual".to_string(),
        image_url: format!("http://images.example/{id}.jpg"),
    }
}

/// Three items along distinct joint-space directions, visual rows matching
/// joint rows for easy hand-computation.
fn small_catalog() -> Arc<Catalog> {
    let items = vec![item(1, "Alpha"), item(2, "Beta"), item(3, "Gamma")];
    let joint = EmbeddingMatrix::from_rows(
        2,
        &[vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]],
    )
    .unwrap();
    let visual = EmbeddingMatrix::from_rows(
        2,
        &[vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]],
    )
    .unwrap();

    Arc::new(Catalog::from_parts(items, joint, visual).unwrap())
}

fn joint_only(vector: Vec<f32>) -> QueryVectors {
    QueryVectors {
        joint_text: Some(vector),
        ..Default::default()
    }
}

mod query {
    use super::*;

    #[test]
    fn test_from_parts_variants() {
        assert!(matches!(
            SearchQuery::from_parts(Some("q".into()), None),
            Ok(SearchQuery::Text(_))
        ));
        assert!(matches!(
            SearchQuery::from_parts(None, Some(vec![1])),
            Ok(SearchQuery::Image(_))
        ));
        assert!(matches!(
            SearchQuery::from_parts(Some("q".into()), Some(vec![1])),
            Ok(SearchQuery::TextImage { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_empty() {
        let err = SearchQuery::from_parts(None, None).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery { .. }));
    }

    #[test]
    fn test_blank_text_counts_as_absent() {
        let err = SearchQuery::from_parts(Some("   ".into()), None).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery { .. }));

        // Blank text plus an image degrades to an image query.
        let query = SearchQuery::from_parts(Some("  ".into()), Some(vec![1])).unwrap();
        assert!(matches!(query, SearchQuery::Image(_)));
    }

    #[test]
    fn test_empty_image_counts_as_absent() {
        let query = SearchQuery::from_parts(Some("q".into()), Some(vec![])).unwrap();
        assert!(matches!(query, SearchQuery::Text(_)));
    }

    #[test]
    fn test_text_is_trimmed() {
        let query = SearchQuery::from_parts(Some("  red dress  ".into()), None).unwrap();
        assert_eq!(query.text(), Some("red dress"));
    }
}

mod retriever {
    use super::*;

    #[test]
    fn test_orders_by_similarity() {
        let catalog = small_catalog();
        let retriever = CoarseRetriever::default();

        let pool = retriever.retrieve(&joint_only(vec![1.0, 0.0]), &catalog);

        assert_eq!(pool.len(), 3);
        assert_eq!(pool[0].row, 0); // aligned
        assert_eq!(pool[1].row, 1); // orthogonal
        assert_eq!(pool[2].row, 2); // opposite
        assert!((pool[0].coarse_score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_truncates_to_initial_k() {
        let catalog = small_catalog();
        let retriever = CoarseRetriever::with_initial_k(2);

        let pool = retriever.retrieve(&joint_only(vec![1.0, 0.0]), &catalog);

        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_small_catalog_returns_all_rows() {
        let catalog = small_catalog();
        let retriever = CoarseRetriever::default();
        assert!(retriever.initial_k() > catalog.len());

        let pool = retriever.retrieve(&joint_only(vec![0.0, 1.0]), &catalog);

        assert_eq!(pool.len(), catalog.len());
    }

    #[test]
    fn test_hybrid_scores_are_elementwise_mean() {
        let catalog = small_catalog();
        let retriever = CoarseRetriever::default();

        let vectors = QueryVectors {
            joint_text: Some(vec![1.0, 0.0]),
            joint_image: Some(vec![0.0, 1.0]),
            visual: None,
        };

        let pool = retriever.retrieve(&vectors, &catalog);

        // Row 0: (1.0 + 0.0) / 2, row 1: (0.0 + 1.0) / 2, row 2: (-1.0 + 0.0) / 2.
        let by_row = |row: usize| {
            pool.iter()
                .find(|c| c.row == row)
                .map(|c| c.coarse_score)
                .unwrap()
        };
        assert!((by_row(0) - 0.5).abs() < 1e-6);
        assert!((by_row(1) - 0.5).abs() < 1e-6);
        assert!((by_row(2) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ties_break_by_ascending_row() {
        let catalog = small_catalog();
        let retriever = CoarseRetriever::default();

        // Zero query vector scores 0.0 everywhere: a full tie.
        let pool = retriever.retrieve(&joint_only(vec![0.0, 0.0]), &catalog);

        let rows: Vec<usize> = pool.iter().map(|c| c.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert!(pool.iter().all(|c| c.coarse_score == 0.0));
    }

    #[test]
    fn test_no_joint_vector_yields_empty_pool() {
        let catalog = small_catalog();
        let retriever = CoarseRetriever::default();

        let pool = retriever.retrieve(&QueryVectors::default(), &catalog);

        assert!(pool.is_empty());
    }
}

mod reranker {
    use super::*;

    fn pool(rows: &[usize]) -> Vec<Candidate> {
        rows.iter()
            .map(|&row| Candidate {
                row,
                coarse_score: 0.9 - row as f32 * 0.1,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_text_only_score_is_oracle_passthrough() {
        let catalog = small_catalog();
        let scorer = MockTextScorer::new()
            .with_score(&catalog.item(0).description(), 0.9)
            .with_score(&catalog.item(1).description(), 0.95)
            .with_score(&catalog.item(2).description(), 0.2);
        let reranker = Reranker::new(scorer);

        let query = SearchQuery::Text("anything".to_string());
        let scored = reranker
            .rerank(&query, &QueryVectors::default(), pool(&[0, 1, 2]), &catalog)
            .await
            .unwrap();

        assert_eq!(scored[0].rerank_score, 0.9);
        assert_eq!(scored[1].rerank_score, 0.95);
        assert_eq!(scored[2].rerank_score, 0.2);
    }

    #[tokio::test]
    async fn test_image_only_score_is_visual_cosine() {
        let catalog = small_catalog();
        let reranker = Reranker::new(MockTextScorer::new());

        let query = SearchQuery::Image(vec![1]);
        let vectors = QueryVectors {
            visual: Some(vec![1.0, 0.0]),
            ..Default::default()
        };

        let scored = reranker
            .rerank(&query, &vectors, pool(&[0, 1, 2]), &catalog)
            .await
            .unwrap();

        assert!((scored[0].rerank_score - 1.0).abs() < 1e-6);
        assert!(scored[1].rerank_score.abs() < 1e-6);
        assert!((scored[2].rerank_score + 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_hybrid_fusion_arithmetic() {
        let catalog = small_catalog();
        let scorer = MockTextScorer::new()
            .with_score(&catalog.item(0).description(), 0.8)
            .with_score(&catalog.item(1).description(), 0.4);
        let reranker = Reranker::new(scorer);

        let query = SearchQuery::TextImage {
            text: "q".to_string(),
            image: vec![1],
        };
        let vectors = QueryVectors {
            joint_text: Some(vec![1.0, 0.0]),
            joint_image: Some(vec![1.0, 0.0]),
            visual: Some(vec![1.0, 0.0]),
        };

        let scored = reranker
            .rerank(&query, &vectors, pool(&[0, 1]), &catalog)
            .await
            .unwrap();

        // Row 0: 0.5*0.8 + 0.5*1.0; row 1: 0.5*0.4 + 0.5*0.0.
        assert!((scored[0].rerank_score - 0.9).abs() < 1e-6);
        assert!((scored[1].rerank_score - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_scorer_failure_fails_whole_pool() {
        let catalog = small_catalog();
        let reranker = Reranker::new(MockTextScorer::failing());

        let query = SearchQuery::Text("q".to_string());
        let err = reranker
            .rerank(&query, &QueryVectors::default(), pool(&[0, 1]), &catalog)
            .await
            .unwrap_err();

        assert!(matches!(err, RerankError::Scorer(ScoringError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_score_count_mismatch_detected() {
        struct ShortScorer;

        impl TextPairScorer for ShortScorer {
            async fn score_batch(
                &self,
                _query: &str,
                descriptions: &[String],
            ) -> Result<Vec<f32>, ScoringError> {
                Ok(vec![0.5; descriptions.len() - 1])
            }
        }

        let catalog = small_catalog();
        let reranker = Reranker::new(ShortScorer);

        let query = SearchQuery::Text("q".to_string());
        let err = reranker
            .rerank(&query, &QueryVectors::default(), pool(&[0, 1]), &catalog)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RerankError::ScoreCountMismatch {
                expected: 2,
                actual: 1,
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_query_visual_vector_is_an_error() {
        let catalog = small_catalog();
        let reranker = Reranker::new(MockTextScorer::new());

        let query = SearchQuery::Image(vec![1]);
        let err = reranker
            .rerank(&query, &QueryVectors::default(), pool(&[0]), &catalog)
            .await
            .unwrap_err();

        assert!(matches!(err, RerankError::MissingQueryVector));
    }

    #[tokio::test]
    async fn test_single_batched_scorer_call() {
        let catalog = small_catalog();
        let scorer = MockTextScorer::new();
        let sizes = scorer.clone();
        let reranker = Reranker::new(scorer);

        let query = SearchQuery::Text("q".to_string());
        reranker
            .rerank(&query, &QueryVectors::default(), pool(&[0, 1, 2]), &catalog)
            .await
            .unwrap();

        assert_eq!(sizes.batch_sizes(), vec![3]);
    }

    #[test]
    fn test_fusion_weights_validation() {
        assert!(FusionWeights::default().validate().is_ok());
        assert!(FusionWeights { text: 0.6, visual: 0.4 }.validate().is_ok());
        assert!(FusionWeights { text: 0.8, visual: 0.8 }.validate().is_err());
        assert!(FusionWeights { text: -0.5, visual: 1.5 }.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "invalid fusion weights")]
    fn test_fusion_weights_new_panics_on_bad_split() {
        let _ = FusionWeights::new(0.9, 0.9);
    }
}

mod assembler {
    use super::*;

    fn scored(rows_and_scores: &[(usize, f32)]) -> Vec<ScoredCandidate> {
        rows_and_scores
            .iter()
            .map(|&(row, rerank_score)| ScoredCandidate {
                row,
                coarse_score: 0.0,
                rerank_score,
            })
            .collect()
    }

    #[test]
    fn test_sorts_descending_and_truncates() {
        let catalog = small_catalog();

        let hits = assemble(scored(&[(0, 0.9), (1, 0.95), (2, 0.2)]), 2, &catalog);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 2);
        assert_eq!(hits[1].id, 1);
    }

    #[test]
    fn test_ties_preserve_coarse_order() {
        let catalog = small_catalog();

        // Candidates arrive in coarse order (2, 0, 1), all with equal
        // rerank scores; that order must survive the stable sort.
        let hits = assemble(scored(&[(2, 0.5), (0, 0.5), (1, 0.5)]), 3, &catalog);

        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_top_k_zero_is_empty_non_error() {
        let catalog = small_catalog();

        let hits = assemble(scored(&[(0, 0.9)]), 0, &catalog);

        assert!(hits.is_empty());
    }

    #[test]
    fn test_hit_carries_item_fields() {
        let catalog = small_catalog();

        let hits = assemble(scored(&[(1, 0.7)]), 5, &catalog);

        assert_eq!(hits[0].title, "Beta");
        assert_eq!(hits[0].sub_category, "Topwear");
        assert_eq!(hits[0].rerank_score, 0.7);
    }
}

mod engine {
    use super::*;

    fn engine(
        catalog: Arc<Catalog>,
    ) -> SearchEngine<MockJointEncoder, MockVisualEncoder, MockTextScorer> {
        let adapter = EncoderAdapter::new(MockJointEncoder::new(2), MockVisualEncoder::new(2));
        SearchEngine::new(catalog, adapter, MockTextScorer::new())
    }

    #[tokio::test]
    async fn test_rejects_empty_query() {
        let engine = engine(small_catalog());

        let err = engine.search(None, None, 5).await.unwrap_err();

        assert!(matches!(err, SearchError::InvalidQuery { .. }));
    }

    #[tokio::test]
    async fn test_joint_dimension_mismatch_rejected() {
        let catalog = small_catalog(); // joint dim 2
        let adapter = EncoderAdapter::new(MockJointEncoder::new(3), MockVisualEncoder::new(2));
        let engine = SearchEngine::new(catalog, adapter, MockTextScorer::new());

        let err = engine.search(Some("q"), None, 5).await.unwrap_err();

        assert!(matches!(
            err,
            SearchError::Encoding(EncodingError::InvalidDimension { expected: 2, actual: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_visual_dimension_mismatch_rejected() {
        let catalog = small_catalog(); // visual dim 2
        let adapter = EncoderAdapter::new(MockJointEncoder::new(2), MockVisualEncoder::new(4));
        let engine = SearchEngine::new(catalog, adapter, MockTextScorer::new());

        let err = engine.search(None, Some(&[1, 2]), 5).await.unwrap_err();

        assert!(matches!(
            err,
            SearchError::Encoding(EncodingError::InvalidDimension { expected: 2, actual: 4, .. })
        ));
    }

    #[tokio::test]
    async fn test_search_returns_ranked_hits() {
        let catalog = small_catalog();
        let adapter = EncoderAdapter::new(
            MockJointEncoder::new(2).with_text("query", vec![1.0, 0.0]),
            MockVisualEncoder::new(2),
        );
        let scorer = MockTextScorer::new()
            .with_score(&catalog.item(0).description(), 0.9)
            .with_score(&catalog.item(1).description(), 0.95)
            .with_score(&catalog.item(2).description(), 0.2);
        let engine = SearchEngine::new(catalog, adapter, scorer);

        let hits = engine.search(Some("query"), None, 2).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 2);
        assert_eq!(hits[1].id, 1);
    }
}

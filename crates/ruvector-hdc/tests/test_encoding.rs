//! Structured encoders, level encoding, search and the item memory together.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use ruvector_hdc::inference::{
    approx_eq, nearest_neighbor_by_key, nearest_neighbors_by_key, SignificanceTest,
};
use ruvector_hdc::{
    bind_pair, cross_product, hash_table, level, ngrams, similarity, similarity_matrix,
    similarity_to, similarity_with, BinaryHV, BipolarHV, HdcError, Hypervector, ItemMemory,
    LevelDecoder, LevelEncoder, RealHV, SignificanceConfig, SimilarityMethod, TernaryHV,
};

const DIM: usize = 10_000;

#[test]
fn record_fields_recoverable() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut memory = ItemMemory::<BipolarHV>::new(DIM).unwrap();
    let fields = [("name", "alice"), ("age", "thirty"), ("city", "paris")];

    let keys: Vec<_> = fields
        .iter()
        .map(|(k, _)| memory.get_or_create(k).unwrap().clone())
        .collect();
    let values: Vec<_> = fields
        .iter()
        .map(|(_, v)| memory.get_or_create(v).unwrap().clone())
        .collect();
    let record = hash_table(&keys, &values, &mut rng).unwrap();

    for (key, (_, expected)) in keys.iter().zip(fields.iter()) {
        let noisy = bind_pair(&record, key).unwrap();
        assert_eq!(memory.cleanup(&noisy).unwrap().key, *expected);
    }
}

#[test]
fn cross_product_contains_every_pairing() {
    let mut rng = StdRng::seed_from_u64(2);
    let us: Vec<RealHV> = (0..3u32)
        .map(|i| RealHV::from_seed(&("u", i), DIM).unwrap())
        .collect();
    let vs: Vec<RealHV> = (0..3u32)
        .map(|i| RealHV::from_seed(&("v", i), DIM).unwrap())
        .collect();
    let product = cross_product(&us, &vs, &mut rng).unwrap();

    let noise = RealHV::from_seed("noise", DIM).unwrap();
    let baseline = similarity(&product, &noise).unwrap().abs();
    for u in &us {
        for v in &vs {
            let pair = bind_pair(u, v).unwrap();
            assert!(similarity(&product, &pair).unwrap() > baseline + 0.1);
        }
    }
}

#[test]
fn ngram_profiles_separate_languages() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut memory = ItemMemory::<BipolarHV>::new(DIM).unwrap();
    let mut encode = |text: &str, rng: &mut StdRng| {
        let letters: Vec<BipolarHV> = text
            .chars()
            .map(|c| memory.get_or_create(&c.to_string()).unwrap().clone())
            .collect();
        ngrams(&letters, 3, rng).unwrap()
    };

    let english = encode("the quick brown fox jumps over the lazy dog", &mut rng);
    let english2 = encode("the lazy dog sleeps over the brown fox", &mut rng);
    let other = encode("zyxwvu tsrqpo nmlkji hgfedc", &mut rng);

    let same = similarity(&english, &english2).unwrap();
    let different = similarity(&english, &other).unwrap();
    assert!(same > different, "same {} vs different {}", same, different);
}

#[test]
fn level_encoder_round_trip() {
    let mut rng = StdRng::seed_from_u64(4);
    let base = RealHV::random(DIM, &mut rng).unwrap();
    let encoder = LevelEncoder::from_range(&base, 0.0, 1.0, 21, &mut rng).unwrap();
    let decoder = encoder.decoder();

    for &x in &[0.0, 0.13, 0.5, 0.77, 1.0] {
        let decoded = decoder.decode(encoder.encode(x)).unwrap();
        assert!((decoded - x).abs() <= 0.025 + 1e-9, "{} decoded as {}", x, decoded);
    }

    // Similarity falls off with distance along the scale.
    let near = similarity(encoder.encode(0.5), encoder.encode(0.55)).unwrap();
    let far = similarity(encoder.encode(0.5), encoder.encode(1.0)).unwrap();
    assert!(near > far);
}

#[test]
fn level_decoder_from_explicit_table() {
    let mut rng = StdRng::seed_from_u64(5);
    let base = BinaryHV::random(DIM, &mut rng).unwrap();
    let levels = level(&base, 4, &mut rng).unwrap();
    let decoder = LevelDecoder::new(levels.clone(), vec![10.0, 20.0, 30.0, 40.0]).unwrap();
    assert_eq!(decoder.decode(&levels[2]).unwrap(), 30.0);

    let wrong = BinaryHV::random(DIM / 2, &mut rng).unwrap();
    assert!(matches!(
        decoder.decode(&wrong),
        Err(HdcError::DimensionMismatch { .. })
    ));
}

#[test]
fn search_over_maps_and_slices_agree() {
    let vectors: Vec<TernaryHV> = (0..30u32)
        .map(|i| TernaryHV::from_seed(&i, 2048).unwrap())
        .collect();
    let map: HashMap<usize, TernaryHV> = vectors.iter().cloned().enumerate().collect();
    let query = vectors[17].clone();

    let from_slice = ruvector_hdc::nearest_neighbors(&query, &vectors, 4).unwrap();
    let from_map = nearest_neighbors_by_key(&query, map.iter().map(|(k, v)| (*k, v)), 4).unwrap();
    let slice_keys: Vec<usize> = from_slice.iter().map(|h| h.key).collect();
    let map_keys: Vec<usize> = from_map.iter().map(|h| h.key).collect();
    assert_eq!(slice_keys, map_keys);
    assert_eq!(slice_keys[0], 17);

    let best = nearest_neighbor_by_key(&query, map.iter().map(|(k, v)| (*k, v))).unwrap();
    assert_eq!(best.key, 17);
}

#[test]
fn curried_similarity_and_matrix() {
    let vectors: Vec<BipolarHV> = (0..4u32)
        .map(|i| BipolarHV::from_seed(&i, 1024).unwrap())
        .collect();
    let matrix = similarity_matrix(&vectors).unwrap();
    let row: Vec<f32> = vectors
        .iter()
        .map(similarity_to(&vectors[2]))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(row, matrix[2]);
}

#[test]
fn explicit_methods_parse_and_apply() {
    let a = BinaryHV::from_values(&[true, true, false, false]).unwrap();
    let b = BinaryHV::from_values(&[true, false, true, false]).unwrap();

    let method: SimilarityMethod = "hamming".parse().unwrap();
    assert_eq!(similarity_with(&a, &b, method).unwrap(), 0.5);
    let jaccard = similarity_with(&a, &b, "jaccard".parse().unwrap()).unwrap();
    assert!((jaccard - similarity(&a, &b).unwrap()).abs() < 1e-6);
    assert!(matches!(
        "manhattan".parse::<SimilarityMethod>(),
        Err(HdcError::UnsupportedMethod(_))
    ));
}

#[test]
fn significance_distinguishes_related_vectors() {
    let mut rng = StdRng::seed_from_u64(6);
    let config = SignificanceConfig::default();

    let a = BinaryHV::random(DIM, &mut rng).unwrap();
    let b = BinaryHV::random(DIM, &mut rng).unwrap();
    let c = BinaryHV::random(DIM, &mut rng).unwrap();
    let bundled = ruvector_hdc::bundle(&[a.clone(), b, c], &mut rng).unwrap();

    assert!(bundled.is_similar_to(&a, &config, &mut rng).unwrap());
    let unrelated = BinaryHV::random(DIM, &mut rng).unwrap();
    assert!(!approx_eq(&unrelated, &a, &config, &mut rng).unwrap());
}

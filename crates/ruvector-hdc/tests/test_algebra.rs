//! Statistical and algebraic behaviour of every variant.

use rand::rngs::StdRng;
use rand::SeedableRng;
use ruvector_hdc::{
    bind_pair, bundle, nearest_neighbor, similarity, AnyHypervector, BinaryHV, BipolarHV,
    GradedBipolarHV, GradedHV, HdcError, Hypervector, RealHV, TernaryHV, Variant,
};

const DIM: usize = 10_000;

fn chance_similarity<H: Hypervector>(seed: u64) -> f32 {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = H::random(DIM, &mut rng).unwrap();
    let b = H::random(DIM, &mut rng).unwrap();
    similarity(&a, &b).unwrap()
}

#[test]
fn random_vectors_are_quasi_orthogonal() {
    for seed in 0..5 {
        assert!(chance_similarity::<BipolarHV>(seed).abs() < 0.05);
        assert!(chance_similarity::<TernaryHV>(seed).abs() < 0.05);
        assert!(chance_similarity::<RealHV>(seed).abs() < 0.05);
        assert!((chance_similarity::<BinaryHV>(seed) - 1.0 / 3.0).abs() < 0.03);
    }
}

#[test]
fn graded_chance_levels() {
    // E[uv] / E[u + v - uv] = (1/4) / (3/4) for independent uniforms.
    let sim = chance_similarity::<GradedHV>(11);
    assert!((sim - 1.0 / 3.0).abs() < 0.03, "graded: {}", sim);

    let sim = chance_similarity::<GradedBipolarHV>(12);
    assert!(sim.abs() < 0.05, "graded bipolar: {}", sim);
}

fn bundle_beats_noise<H: Hypervector>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = H::random(DIM, &mut rng).unwrap();
    let b = H::random(DIM, &mut rng).unwrap();
    let c = H::random(DIM, &mut rng).unwrap();
    let d = H::random(DIM, &mut rng).unwrap();

    let s = bundle(&[a.clone(), b, c], &mut rng).unwrap();
    let member = similarity(&s, &a).unwrap();
    let outsider = similarity(&d, &a).unwrap();
    assert!(
        member > outsider,
        "{}: member {} <= outsider {}",
        H::VARIANT,
        member,
        outsider
    );
}

#[test]
fn bundle_is_similar_to_its_members() {
    bundle_beats_noise::<BinaryHV>(20);
    bundle_beats_noise::<BipolarHV>(21);
    bundle_beats_noise::<TernaryHV>(22);
    bundle_beats_noise::<RealHV>(23);
    bundle_beats_noise::<GradedHV>(24);
    bundle_beats_noise::<GradedBipolarHV>(25);
}

fn exact_unbind<H: Hypervector>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = H::random(DIM, &mut rng).unwrap();
    let b = H::random(DIM, &mut rng).unwrap();
    let recovered = bind_pair(&bind_pair(&a, &b).unwrap(), &a).unwrap();
    assert_eq!(recovered, b);
}

#[test]
fn bind_is_exactly_self_inverse_for_discrete_variants() {
    exact_unbind::<BinaryHV>(30);
    exact_unbind::<BipolarHV>(31);
    exact_unbind::<TernaryHV>(32);
}

#[test]
fn bind_is_dissimilar_to_operands() {
    let mut rng = StdRng::seed_from_u64(33);
    let a = BipolarHV::random(DIM, &mut rng).unwrap();
    let b = BipolarHV::random(DIM, &mut rng).unwrap();
    let ab = bind_pair(&a, &b).unwrap();
    assert!(similarity(&ab, &a).unwrap().abs() < 0.05);
    assert!(similarity(&ab, &b).unwrap().abs() < 0.05);
}

fn rejects_mismatched_dimensions<H: Hypervector>() {
    let mut rng = StdRng::seed_from_u64(37);
    let a = H::from_seed("a", 128).unwrap();
    let b = H::from_seed("b", 64).unwrap();

    assert!(matches!(
        bind_pair(&a, &b),
        Err(HdcError::DimensionMismatch {
            expected: 128,
            actual: 64
        })
    ));
    assert!(matches!(
        bundle(&[a.clone(), b.clone()], &mut rng),
        Err(HdcError::DimensionMismatch {
            expected: 128,
            actual: 64
        })
    ));
    assert!(matches!(
        similarity(&a, &b),
        Err(HdcError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        nearest_neighbor(&a, std::slice::from_ref(&b)),
        Err(HdcError::DimensionMismatch { .. })
    ));
}

#[test]
fn every_algebra_entry_point_checks_dimensions() {
    // 128 and 64 bits also differ in packed word count.
    rejects_mismatched_dimensions::<BinaryHV>();
    rejects_mismatched_dimensions::<BipolarHV>();
    rejects_mismatched_dimensions::<TernaryHV>();
    rejects_mismatched_dimensions::<RealHV>();
    rejects_mismatched_dimensions::<GradedHV>();
    rejects_mismatched_dimensions::<GradedBipolarHV>();
}

#[test]
fn odd_majority_matches_direct_count() {
    let mut rng = StdRng::seed_from_u64(34);
    let vectors: Vec<BipolarHV> = (0..7)
        .map(|_| BipolarHV::random(500, &mut rng).unwrap())
        .collect();
    let out = bundle(&vectors, &mut rng).unwrap();

    for i in 0..500 {
        let sum: i32 = vectors.iter().map(|v| v.get(i).unwrap() as i32).sum();
        let expected = if sum > 0 { 1 } else { -1 };
        assert_eq!(out.get(i).unwrap(), expected, "position {}", i);
    }
}

#[test]
fn ternary_bundle_can_leave_range_until_normalized() {
    let v = TernaryHV::from_values(&[1, -1, 0]).unwrap();
    let mut rng = StdRng::seed_from_u64(35);
    let sum = bundle(&[v.clone(), v.clone(), v.clone()], &mut rng).unwrap();
    assert_eq!(sum.as_slice(), &[3, -3, 0]);
    assert_eq!(sum.normalized(), v);
}

#[test]
fn runtime_variants_reject_mixing() {
    let mut rng = StdRng::seed_from_u64(36);
    let real = AnyHypervector::new(Variant::Real, 64, &mut rng).unwrap();
    let graded = AnyHypervector::new(Variant::Graded, 64, &mut rng).unwrap();

    assert!(matches!(
        real.bind(&graded),
        Err(HdcError::VariantMismatch {
            expected: Variant::Real,
            actual: Variant::Graded
        })
    ));
    assert!(matches!(
        AnyHypervector::bind_all(&[real.clone(), graded]),
        Err(HdcError::VariantMismatch { .. })
    ));
    assert!(matches!(
        AnyHypervector::bundle(&[], &mut rng),
        Err(HdcError::EmptyInput)
    ));
    assert!((real.similarity(&real).unwrap() - 1.0).abs() < 1e-5);
}

#[test]
fn serde_roundtrip_preserves_vectors() {
    let hv = AnyHypervector::from_seed(Variant::Bipolar, "persist", 130).unwrap();
    let json = serde_json::to_string(&hv).unwrap();
    let back: AnyHypervector = serde_json::from_str(&json).unwrap();
    assert_eq!(hv, back);

    let real = RealHV::from_seed("persist", 16).unwrap();
    let json = serde_json::to_string(&real).unwrap();
    assert_eq!(serde_json::from_str::<RealHV>(&json).unwrap(), real);
}

fn rejected<T: serde::de::DeserializeOwned>(json: &str) -> bool {
    serde_json::from_str::<T>(json).is_err()
}

#[test]
fn deserialization_enforces_domains() {
    // Packed layouts must match the declared length.
    assert!(rejected::<BinaryHV>(r#"{"bits":{"words":[],"len":100}}"#));
    assert!(rejected::<BipolarHV>(r#"{"signs":{"words":[0],"len":0}}"#));

    // Empty element vectors are rejected for every variant.
    assert!(rejected::<TernaryHV>(r#"{"data":[]}"#));
    assert!(rejected::<RealHV>(r#"{"data":[]}"#));
    assert!(rejected::<GradedHV>(r#"{"data":[]}"#));
    assert!(rejected::<AnyHypervector>(r#"{"Ternary":{"data":[]}}"#));

    // Graded values are clamped into their interval.
    let graded: GradedHV = serde_json::from_str(r#"{"data":[5.0,-3.0,0.25]}"#).unwrap();
    assert_eq!(graded.as_slice(), &[1.0, 0.0, 0.25]);
    let graded: GradedBipolarHV = serde_json::from_str(r#"{"data":[5.0,-3.0,0.25]}"#).unwrap();
    assert_eq!(graded.as_slice(), &[1.0, -1.0, 0.25]);

    // An unnormalized ternary bundle survives a round trip.
    let mut rng = StdRng::seed_from_u64(38);
    let v = TernaryHV::from_values(&[1, -1, 0]).unwrap();
    let sum = bundle(&[v.clone(), v.clone(), v], &mut rng).unwrap();
    let json = serde_json::to_string(&sum).unwrap();
    let back: TernaryHV = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), &[3, -3, 0]);

    // Stray bits past the length are cleared, so decoded vectors stay usable.
    let bits: BinaryHV = serde_json::from_str(r#"{"bits":{"words":[255],"len":3}}"#).unwrap();
    assert_eq!(bits.values(), vec![true, true, true]);
    assert_eq!(bits.count_ones(), 3);
}

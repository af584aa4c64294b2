//! Integration tests for the stochastic operators (Uniform, Normal)
//!
//! Tests verify:
//! - Result shapes for batched and unbatched calls, operator and
//!   functional APIs
//! - Call-time `rng` overriding the construction-time seed
//! - Parity between the operator's own stream and the same handle fed as
//!   an external source
//! - Distribution properties (range membership, moments)
//! - Error cases and operator reusability after failures

use augrand::dtype::DType;
use augrand::error::Error;
use augrand::ops::RandomOps;
use augrand::ops::random::{Normal, NormalArgs, Uniform, UniformArgs, normal, uniform};
use augrand::rng::{RngCallback, RngHandle};
use augrand::runtime::Runtime;
use augrand::runtime::cpu::{CpuDevice, CpuRuntime};
use augrand::tensor::Tensor;

/// Predictable callback source, one state per call site
fn counting_rng() -> RngCallback<impl FnMut() -> u64> {
    let mut state = 0u64;
    RngCallback::new(move || {
        state += 1;
        state * 12345
    })
}

/// Host view of a result tensor, through the device-to-host path
fn as_f32(t: &Tensor<CpuRuntime>) -> Vec<f32> {
    t.cpu().unwrap().to_vec()
}

// ============================================================================
// Result Shapes (operator API)
// ============================================================================

#[test]
fn test_uniform_item_shape_with_external_rng() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::new(&device);
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut rng = counting_rng();
    let out = op.call(&args, None, Some(&mut rng)).unwrap();

    let item = out.item().expect("expected a single item");
    assert_eq!(item.shape(), &[10]);
    assert_eq!(as_f32(item).len(), 10);
}

#[test]
fn test_uniform_batch_shape_with_external_rng() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::new(&device);
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut rng = counting_rng();
    let out = op.call(&args, Some(3), Some(&mut rng)).unwrap();

    let batch = out.batch().expect("expected a batch");
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.item_shape(), Some(&[10usize][..]));
    assert_eq!(batch.to_flat_vec::<f32>().unwrap().len(), 30);
}

#[test]
fn test_normal_item_shape_with_external_rng() {
    let device = CpuDevice::new();
    let mut op = Normal::<CpuRuntime>::new(&device);
    let args = NormalArgs::new(&[10]).mean(0.0).stddev(1.0);

    let mut rng = counting_rng();
    let out = op.call(&args, None, Some(&mut rng)).unwrap();

    let item = out.item().expect("expected a single item");
    assert_eq!(item.shape(), &[10]);
}

#[test]
fn test_normal_batch_shape_with_external_rng() {
    let device = CpuDevice::new();
    let mut op = Normal::<CpuRuntime>::new(&device);
    let args = NormalArgs::new(&[10]);

    let mut rng = counting_rng();
    let out = op.call(&args, Some(3), Some(&mut rng)).unwrap();

    let batch = out.batch().expect("expected a batch");
    assert_eq!(batch.len(), 3);
    for i in 0..3 {
        assert_eq!(batch.get(i).unwrap().shape(), &[10]);
    }
}

// ============================================================================
// Result Shapes (functional API)
// ============================================================================

#[test]
fn test_functional_uniform_shapes() {
    let device = CpuDevice::new();
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut rng = counting_rng();
    let out = uniform::<CpuRuntime>(&device, &args, None, Some(&mut rng)).unwrap();
    assert_eq!(out.item().unwrap().shape(), &[10]);

    let mut rng = counting_rng();
    let out = uniform::<CpuRuntime>(&device, &args, Some(3), Some(&mut rng)).unwrap();
    assert_eq!(out.batch().unwrap().len(), 3);
}

#[test]
fn test_functional_normal_shapes() {
    let device = CpuDevice::new();
    let args = NormalArgs::new(&[10]);

    let mut rng = counting_rng();
    let out = normal::<CpuRuntime>(&device, &args, None, Some(&mut rng)).unwrap();
    assert_eq!(out.item().unwrap().shape(), &[10]);

    let mut rng = counting_rng();
    let out = normal::<CpuRuntime>(&device, &args, Some(3), Some(&mut rng)).unwrap();
    assert_eq!(out.batch().unwrap().len(), 3);
}

#[test]
fn test_functional_matches_operator_api_for_equal_rng() {
    let device = CpuDevice::new();
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut rng = counting_rng();
    let via_fn = uniform::<CpuRuntime>(&device, &args, None, Some(&mut rng)).unwrap();

    let mut rng = counting_rng();
    let mut op = Uniform::<CpuRuntime>::new(&device);
    let via_op = op.call(&args, None, Some(&mut rng)).unwrap();

    assert_eq!(as_f32(via_fn.item().unwrap()), as_f32(via_op.item().unwrap()));
}

// ============================================================================
// Seed / Rng Binding
// ============================================================================

#[test]
fn test_rng_overrides_construction_seed() {
    let device = CpuDevice::new();
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    // Same external rng, three different construction-time seeds: the seed
    // must have no observable effect once rng is present.
    let mut results = Vec::new();
    for seed in [42u64, 9999, 0] {
        let mut op = Uniform::<CpuRuntime>::with_seed(&device, seed);
        let mut rng = counting_rng();
        let out = op.call(&args, None, Some(&mut rng)).unwrap();
        results.push(as_f32(out.item().unwrap()));
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[test]
fn test_external_rng_leaves_internal_stream_untouched() {
    let device = CpuDevice::new();
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 5);
    let mut rng = counting_rng();
    op.call(&args, None, Some(&mut rng)).unwrap();

    // The next native call starts from cursor 0, as if the rng call never
    // happened.
    let after_external = op.call(&args, None, None).unwrap();

    let mut fresh = Uniform::<CpuRuntime>::with_seed(&device, 5);
    let first_native = fresh.call(&args, None, None).unwrap();

    assert_eq!(
        as_f32(after_external.item().unwrap()),
        as_f32(first_native.item().unwrap())
    );
}

#[test]
fn test_native_calls_advance_the_stream() {
    let device = CpuDevice::new();
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 7);
    let first = op.call(&args, None, None).unwrap();
    let second = op.call(&args, None, None).unwrap();

    assert_ne!(
        as_f32(first.item().unwrap()),
        as_f32(second.item().unwrap()),
        "consecutive native calls should not repeat"
    );

    // Two calls of 10 elements are words 0..20 of the stream.
    let client = CpuRuntime::default_client(&device);
    let whole = client
        .philox_uniform(&[20], 7, 0, 0.0, 1.0, DType::F32)
        .unwrap();
    let mut concat = as_f32(first.item().unwrap());
    concat.extend(as_f32(second.item().unwrap()));
    assert_eq!(concat, whole.to_vec::<f32>());
}

// ============================================================================
// Native / External Parity
// ============================================================================

#[test]
fn test_uniform_native_equals_handle_fed_as_source() {
    let device = CpuDevice::new();

    for shape in [[9usize], [10usize]] {
        let args = UniformArgs::new(&shape).range(-2.0, 2.0);

        let mut native_op = Uniform::<CpuRuntime>::with_seed(&device, 777);
        let native = native_op.call(&args, None, None).unwrap();

        let mut handle = RngHandle::new(777);
        let mut external_op = Uniform::<CpuRuntime>::new(&device);
        let external = external_op.call(&args, None, Some(&mut handle)).unwrap();

        assert_eq!(
            as_f32(native.item().unwrap()),
            as_f32(external.item().unwrap()),
            "shape {:?}",
            shape
        );
        assert_eq!(handle.cursor(), shape[0] as u64);
    }
}

#[test]
fn test_normal_native_equals_handle_fed_as_source() {
    let device = CpuDevice::new();

    for shape in [[9usize], [10usize]] {
        let args = NormalArgs::new(&shape).mean(1.0).stddev(0.5);

        let mut native_op = Normal::<CpuRuntime>::with_seed(&device, 4242);
        let native = native_op.call(&args, None, None).unwrap();

        let mut handle = RngHandle::new(4242);
        let mut external_op = Normal::<CpuRuntime>::new(&device);
        let external = external_op.call(&args, None, Some(&mut handle)).unwrap();

        assert_eq!(
            as_f32(native.item().unwrap()),
            as_f32(external.item().unwrap()),
            "shape {:?}",
            shape
        );
    }
}

#[test]
fn test_cloned_handles_give_identical_operator_results() {
    let device = CpuDevice::new();
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut rng3 = RngHandle::new(9999);
    let mut rng4 = rng3.clone();

    let mut op1 = Uniform::<CpuRuntime>::new(&device);
    let result1 = op1.call(&args, None, Some(&mut rng3)).unwrap();

    let mut op2 = Uniform::<CpuRuntime>::new(&device);
    let result2 = op2.call(&args, None, Some(&mut rng4)).unwrap();

    assert_eq!(
        as_f32(result1.item().unwrap()),
        as_f32(result2.item().unwrap()),
        "cloned rngs should produce identical operator results"
    );
}

#[test]
fn test_batch_consumes_the_stream_consecutively() {
    let device = CpuDevice::new();

    let mut batched = Uniform::<CpuRuntime>::with_seed(&device, 31);
    let batch_out = batched
        .call(&UniformArgs::new(&[10]).range(0.0, 1.0), Some(3), None)
        .unwrap();
    let flat = batch_out.batch().unwrap().to_flat_vec::<f32>().unwrap();

    let mut single = Uniform::<CpuRuntime>::with_seed(&device, 31);
    let single_out = single
        .call(&UniformArgs::new(&[30]).range(0.0, 1.0), None, None)
        .unwrap();

    assert_eq!(flat, as_f32(single_out.item().unwrap()));
}

// ============================================================================
// Distribution Properties
// ============================================================================

#[test]
fn test_uniform_values_in_range() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 1);
    let out = op
        .call(&UniformArgs::new(&[1000]).range(5.0, 10.0), None, None)
        .unwrap();

    for v in as_f32(out.item().unwrap()) {
        assert!((5.0..10.0).contains(&v), "uniform value {} out of range", v);
    }
}

#[test]
fn test_uniform_default_range() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 2);
    let out = op.call(&UniformArgs::new(&[1000]), None, None).unwrap();

    let data = as_f32(out.item().unwrap());
    for v in &data {
        assert!((-1.0..1.0).contains(v), "value {} outside [-1, 1)", v);
    }

    let mean: f32 = data.iter().sum::<f32>() / data.len() as f32;
    assert!(mean.abs() < 0.1, "mean {} should be near 0", mean);
}

#[test]
fn test_normal_moments() {
    let device = CpuDevice::new();
    let mut op = Normal::<CpuRuntime>::with_seed(&device, 3);
    let out = op
        .call(
            &NormalArgs::new(&[10000]).dtype(DType::F64),
            None,
            None,
        )
        .unwrap();

    let data: Vec<f64> = out.item().unwrap().to_vec();
    let mean: f64 = data.iter().sum::<f64>() / data.len() as f64;
    let variance: f64 = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;

    assert!(mean.abs() < 0.05, "normal mean {} should be near 0", mean);
    assert!(
        (variance - 1.0).abs() < 0.1,
        "normal variance {} should be near 1",
        variance
    );
}

#[test]
fn test_normal_shifted_moments() {
    let device = CpuDevice::new();
    let mut op = Normal::<CpuRuntime>::with_seed(&device, 4);
    let out = op
        .call(
            &NormalArgs::new(&[10000]).mean(5.0).stddev(2.0).dtype(DType::F64),
            None,
            None,
        )
        .unwrap();

    let data: Vec<f64> = out.item().unwrap().to_vec();
    let mean: f64 = data.iter().sum::<f64>() / data.len() as f64;
    assert!((mean - 5.0).abs() < 0.1, "mean {} should be near 5", mean);
}

#[test]
fn test_discrete_values_membership() {
    let device = CpuDevice::new();
    let values = [0.25f64, 0.5, 0.75];
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 5);
    let out = op
        .call(&UniformArgs::new(&[200]).values(values), None, None)
        .unwrap();

    let data = as_f32(out.item().unwrap());
    for v in &data {
        assert!(
            values.iter().any(|&w| (w as f32 - v).abs() < f32::EPSILON),
            "value {} not in the discrete set",
            v
        );
    }

    // All three values should appear over 200 draws.
    for w in values {
        assert!(
            data.iter().any(|&v| (v - w as f32).abs() < f32::EPSILON),
            "value {} never drawn",
            w
        );
    }
}

#[test]
fn test_discrete_values_parity_with_external_source() {
    let device = CpuDevice::new();
    let values = [1.0f64, 2.0, 3.0];

    let mut native_op = Uniform::<CpuRuntime>::with_seed(&device, 6);
    let native = native_op
        .call(&UniformArgs::new(&[50]).values(values), None, None)
        .unwrap();

    let mut handle = RngHandle::new(6);
    let mut external_op = Uniform::<CpuRuntime>::new(&device);
    let external = external_op
        .call(&UniformArgs::new(&[50]).values(values), None, Some(&mut handle))
        .unwrap();

    assert_eq!(
        as_f32(native.item().unwrap()),
        as_f32(external.item().unwrap())
    );
}

// ============================================================================
// DTypes
// ============================================================================

#[test]
fn test_f64_output() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 8);
    let out = op
        .call(
            &UniformArgs::new(&[10]).range(0.0, 1.0).dtype(DType::F64),
            None,
            None,
        )
        .unwrap();

    let item = out.item().unwrap();
    assert_eq!(item.dtype(), DType::F64);
    let data: Vec<f64> = item.to_vec();
    assert!(data.iter().all(|v| (0.0..1.0).contains(v)));
}

#[test]
fn test_integer_dtype_rejected() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 9);
    let result = op.call(
        &UniformArgs::new(&[10]).range(0.0, 1.0).dtype(DType::I32),
        None,
        None,
    );
    assert!(matches!(result, Err(Error::UnsupportedDType { .. })));
}

// ============================================================================
// Error Cases
// ============================================================================

#[test]
fn test_range_and_values_conflict() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 10);
    let args = UniformArgs::new(&[10]).range(0.0, 1.0).values([1.0, 2.0]);

    let result = op.call(&args, None, None);
    assert!(matches!(result, Err(Error::ConfigConflict { .. })));
}

#[test]
fn test_empty_values_rejected() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 11);
    let result = op.call(&UniformArgs::new(&[10]).values(Vec::new()), None, None);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_inverted_range_rejected() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 12);
    let result = op.call(&UniformArgs::new(&[10]).range(1.0, 0.0), None, None);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_zero_batch_size_rejected() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 13);
    let result = op.call(&UniformArgs::new(&[10]).range(0.0, 1.0), Some(0), None);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_negative_stddev_rejected() {
    let device = CpuDevice::new();
    let mut op = Normal::<CpuRuntime>::with_seed(&device, 14);
    let result = op.call(&NormalArgs::new(&[10]).stddev(-1.0), None, None);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_misbehaving_callback_fails_the_call() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 15);
    let args = UniformArgs::new(&[10]).range(0.0, 1.0);

    let mut bad = RngCallback::new(|| u64::from(u32::MAX) + 1);
    let result = op.call(&args, None, Some(&mut bad));
    assert!(matches!(result, Err(Error::RngCallback { .. })));

    // The operator instance stays reusable after a failed call.
    let mut good = counting_rng();
    let out = op.call(&args, None, Some(&mut good)).unwrap();
    assert_eq!(out.item().unwrap().shape(), &[10]);

    // And its internal stream was not perturbed by the failure.
    let native = op.call(&args, None, None).unwrap();
    let mut fresh = Uniform::<CpuRuntime>::with_seed(&device, 15);
    let expected = fresh.call(&args, None, None).unwrap();
    assert_eq!(
        as_f32(native.item().unwrap()),
        as_f32(expected.item().unwrap())
    );
}

// ============================================================================
// Empty Shapes
// ============================================================================

#[test]
fn test_empty_shape() {
    let device = CpuDevice::new();
    let mut op = Uniform::<CpuRuntime>::with_seed(&device, 16);
    let out = op
        .call(&UniformArgs::new(&[0]).range(0.0, 1.0), None, None)
        .unwrap();
    assert_eq!(out.item().unwrap().numel(), 0);
}

#[test]
fn test_multi_dimensional_shape() {
    let device = CpuDevice::new();
    let mut op = Normal::<CpuRuntime>::with_seed(&device, 17);
    let out = op.call(&NormalArgs::new(&[2, 3, 4]), None, None).unwrap();
    let item = out.item().unwrap();
    assert_eq!(item.shape(), &[2, 3, 4]);
    assert_eq!(item.numel(), 24);
}

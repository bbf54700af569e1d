//! Demo training a binary SVM on a small separable problem

use multisvm::core::{FeatureVector, PairwiseModel, Sample, SolverConfig};
use multisvm::kernel::{PolynomialKernel, RbfKernel};
use multisvm::SvmClassifier;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Binary SVM Demo ===");

    // Two clusters along the diagonal
    let samples = vec![
        Sample::new(FeatureVector::new(vec![1.0, 1.0]), 1.0),
        Sample::new(FeatureVector::new(vec![2.0, 2.0]), 1.0),
        Sample::new(FeatureVector::new(vec![1.5, 2.5]), 1.0),
        Sample::new(FeatureVector::new(vec![5.0, 5.0]), -1.0),
        Sample::new(FeatureVector::new(vec![6.0, 6.0]), -1.0),
        Sample::new(FeatureVector::new(vec![5.5, 6.5]), -1.0),
    ];
    println!("Training data points: {}", samples.len());

    let config = SolverConfig {
        seed: Some(1),
        ..SolverConfig::default()
    };

    println!("\n--- Degree-1 polynomial kernel ---");
    let poly = PolynomialKernel::new(1)?;
    let model = SvmClassifier::train(&samples, poly, &config)?;
    println!("Support vectors: {}", model.n_support_vectors());
    println!("Threshold: {:.4}", model.threshold());
    println!("Converged: {}", model.converged());

    for sample in &samples {
        let pred = model.predict(&sample.features);
        println!(
            "  {:?} -> {:+.0} (decision value {:+.3})",
            sample.features.values, pred.label, pred.decision_value
        );
    }

    println!("\n--- RBF kernel (sigma2 = 4.0) ---");
    let rbf = RbfKernel::new(4.0)?;
    let model = SvmClassifier::train(&samples, rbf, &config)?;
    println!("Support vectors: {}", model.n_support_vectors());

    let probe = FeatureVector::new(vec![3.0, 3.0]);
    let pred = model.predict(&probe);
    println!(
        "Probe {:?} -> {:+.0} (confidence {:.3})",
        probe.values,
        pred.label,
        pred.confidence()
    );

    Ok(())
}

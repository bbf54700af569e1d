//! Demo training a 3-class composite classifier with both decision strategies

use multisvm::core::{FeatureVector, SolverConfig};
use multisvm::eval;
use multisvm::kernel::RbfKernel;
use multisvm::multiclass::{CompositeClassifier, MaxWins, Tournament};
use multisvm::persistence::SerializableCompositeModel;
use multisvm::{AnyKernel, SvmClassifier, VecDataset};

fn three_cluster_dataset() -> VecDataset {
    let mut dataset = VecDataset::new();
    let clusters = [(0.0, 0.0, 0), (6.0, 0.0, 1), (3.0, 6.0, 2)];
    let jitter = [(-0.4, -0.2), (0.3, -0.3), (-0.1, 0.4), (0.2, 0.2)];

    for &(cx, cy, class) in &clusters {
        for &(dx, dy) in &jitter {
            dataset.push(FeatureVector::new(vec![cx + dx, cy + dy]), class);
        }
    }
    dataset
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Multiclass SVM Demo ===");

    let dataset = three_cluster_dataset();
    let config = SolverConfig {
        seed: Some(9),
        ..SolverConfig::default()
    };

    let factory = |samples: &[multisvm::Sample]| {
        SvmClassifier::train(samples, AnyKernel::from(RbfKernel::new(2.0)?), &config)
    };

    println!("\n--- Tournament elimination ---");
    let tournament = CompositeClassifier::train(&dataset, factory, Box::new(Tournament))?;
    println!(
        "Classes: {}, pairwise models: {}",
        tournament.num_classes(),
        tournament.num_pairs()
    );
    println!(
        "Training accuracy: {:.1}%",
        eval::accuracy(&tournament, &dataset) * 100.0
    );

    println!("\n--- Max-wins voting ---");
    let voting = CompositeClassifier::train(&dataset, factory, Box::new(MaxWins))?;
    println!(
        "Training accuracy: {:.1}%",
        eval::accuracy(&voting, &dataset) * 100.0
    );

    let probe = FeatureVector::new(vec![5.8, 0.4]);
    println!("\nProbe {:?}:", probe.values);
    println!("  tournament says class {}", tournament.predict(&probe));
    println!("  max-wins says class {}", voting.predict(&probe));

    // Persist and reload the tournament model
    let stored = SerializableCompositeModel::from_classifier(&tournament);
    let path = std::env::temp_dir().join("multisvm_demo_model.json");
    stored.save_to_file(&path)?;
    let reloaded = SerializableCompositeModel::load_from_file(&path)?.into_classifier()?;
    println!(
        "\nReloaded model from {} predicts class {} for the probe",
        path.display(),
        reloaded.predict(&probe)
    );

    Ok(())
}

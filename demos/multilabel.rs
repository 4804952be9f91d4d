use nalgebra::{dvector, DVector};
use neura_multilabel::{prelude::*, utils::multi_hot};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let kind: NeuraObjectiveKind = match std::env::args().nth(1) {
        Some(name) => match name.parse() {
            Ok(kind) => kind,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => NeuraObjectiveKind::default(),
    };
    let objective = match kind.build() {
        Ok(objective) => objective,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    // Label 0: "warm", label 1: "bright", label 2: "both"
    let inputs: Vec<(DVector<f64>, DVector<f64>)> = vec![
        (dvector![0.0, 0.0], multi_hot(3, &[])),
        (dvector![1.0, 0.0], multi_hot(3, &[0])),
        (dvector![0.0, 1.0], multi_hot(3, &[1])),
        (dvector![1.0, 1.0], multi_hot(3, &[0, 1, 2])),
    ];

    let mut model = NeuraLinearModel::zeros(2, 3);
    let mut trainer = NeuraSgdTrainer::new(0.5, 1000);
    trainer.log_epochs = 250;

    if let Err(err) = trainer.train(&objective, &mut model, &inputs) {
        eprintln!("Training failed: {}", err);
        std::process::exit(1);
    }

    println!("Provenance: {:?}", objective.provenance());
    for (input, target) in &inputs {
        match model.predict(&objective, input) {
            Ok(prediction) => println!(
                "Input: {:?}, target: {:?}, predicted: {:?}, scores: {:.3}",
                input.as_slice(),
                target.as_slice(),
                prediction.labels,
                prediction.scores.transpose()
            ),
            Err(err) => eprintln!("Prediction failed: {}", err),
        }
    }
}

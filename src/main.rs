#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result};
    use clap::{Parser, Subcommand};
    use glam::Vec3;
    use rig_kinematics::kinematics::KinematicTarget;
    use rig_kinematics::{ControllerState, RigConfig, SceneGraph, Session};
    use std::path::PathBuf;

    #[derive(Parser)]
    #[command(name = "rig-demo")]
    #[command(about = "Drive the needle rig headless", long_about = None)]
    #[command(version)]
    struct Cli {
        /// Rig configuration (TOML); the built-in needle rig when omitted
        #[arg(long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// List joints with their limits and current values
        Joints,

        /// Repeatedly nudge one joint and report where its limits stop it
        Drive {
            /// Joint name (e.g. "gimbal")
            joint: String,

            /// Delta per step: degrees for rotations, scene units otherwise
            #[arg(long, allow_hyphen_values = true)]
            delta: f32,

            #[arg(long, default_value_t = 10)]
            steps: u32,
        },

        /// Resolve a target pose and play the resulting animations
        Solve {
            #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
            x: f32,
            #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
            y: f32,
            #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
            z: f32,
            /// Polar angle, degrees
            #[arg(long, default_value_t = 0.0)]
            polar: f32,
            /// Azimuth angle, degrees
            #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
            azimuth: f32,
            /// Simulated frame rate of the host loop
            #[arg(long, default_value_t = 60.0)]
            fps: f32,
        },
    }

    fn print_joints(session: &Session, scene: &SceneGraph) -> Result<()> {
        println!("{:<18} {:<12} {:<12} {:>4} {:>8} {:>8} {:>10}", "name", "label", "kind", "axis", "low", "high", "value");
        for joint in session.rig().joints() {
            let kind = if joint.kind.is_rotation() { "rotation" } else { "translation" };
            let limits = joint.limits();
            println!(
                "{:<18} {:<12} {:<12} {:>4} {:>8.1} {:>8.1} {:>10.3}",
                joint.name,
                joint.label,
                kind,
                joint.axis,
                limits.low,
                limits.high,
                joint.current_value(scene)?
            );
        }
        Ok(())
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let config = match &cli.config {
            Some(path) => RigConfig::load(path)
                .with_context(|| format!("loading rig config {}", path.display()))?,
            None => RigConfig::default(),
        };

        let mut session = Session::from_config(&config)?;
        let mut scene = SceneGraph::new();
        session.rig_mut().instantiate(&mut scene)?;

        match cli.command {
            Commands::Joints => print_joints(&session, &scene)?,

            Commands::Drive { joint, delta, steps } => {
                let (_, slider) = session.select_by_name(&scene, &joint)?;
                println!("{} [{}, {}]", slider.header(), slider.min, slider.max);
                for step in 1..=steps {
                    let applied = session.nudge_selected(&mut scene, delta)?;
                    let slider = session.slider_config(&scene)?;
                    println!("step {:>3}: applied {:>8.3} -> {}", step, applied, slider.header());
                    if applied == 0.0 {
                        println!("stopped at limit");
                        break;
                    }
                }
            }

            Commands::Solve { x, y, z, polar, azimuth, fps } => {
                session.set_target(KinematicTarget::new(Vec3::new(x, y, z), polar, azimuth));
                let started = session.perform_kinematics(&scene)?;
                println!("started {} animations", started);

                let dt = 1.0 / fps.max(1.0);
                let idle = ControllerState::default();
                let mut frames = 0u32;
                while session.player().is_playing() {
                    session.update(&mut scene, &idle, dt)?;
                    frames += 1;
                }
                println!("settled after {} frames", frames);
                print_joints(&session, &scene)?;
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use statespace::elevator::{make_elevator_kf_loop, make_elevator_loop};
use statespace::profile::{Constraints, ProfileState, TrapezoidalProfile};
use statespace::ColumnVector;

// ---------------------------------------------------------------------------
// Reference: the same position-sensing elevator cycle written against nalgebra
// ---------------------------------------------------------------------------

struct NalgebraLoop {
    a: nalgebra::Matrix2<f64>,
    b: nalgebra::Vector2<f64>,
    c: nalgebra::RowVector2<f64>,
    k: nalgebra::RowVector2<f64>,
    kff: nalgebra::RowVector2<f64>,
    l: nalgebra::Vector2<f64>,
    x_hat: nalgebra::Vector2<f64>,
    r: nalgebra::Vector2<f64>,
    u: f64,
}

impl NalgebraLoop {
    fn elevator() -> Self {
        Self {
            a: nalgebra::Matrix2::new(1.0, 0.0038123917094548044, 0.0, 0.09251846318419062),
            b: nalgebra::Vector2::new(0.000587130443210727, 0.08610920599650167),
            c: nalgebra::RowVector2::new(1.0, 0.0),
            k: nalgebra::RowVector2::new(197.74500975121012, 1.5868649265235129),
            kff: nalgebra::RowVector2::new(27.107309014237973, 9.9389704745734),
            l: nalgebra::Vector2::new(0.9999757217645118, 0.6994463408695476),
            x_hat: nalgebra::Vector2::zeros(),
            r: nalgebra::Vector2::new(1.0, 0.0),
            u: 0.0,
        }
    }

    fn update(&mut self, y: f64) -> f64 {
        let residual = y - (self.c * self.x_hat)[0];
        self.x_hat += self.l * residual;
        let u = ((self.k * (self.r - self.x_hat))[0] + (self.kff * self.r)[0]).clamp(-12.0, 12.0);
        self.x_hat = self.a * self.x_hat + self.b * u;
        self.u = u;
        u
    }
}

// ---------------------------------------------------------------------------
// Loop update
// ---------------------------------------------------------------------------

fn elevator_update(c: &mut Criterion) {
    let mut g = c.benchmark_group("elevator_update");

    g.bench_function("statespace", |b| {
        let mut ss = make_elevator_loop().unwrap();
        ss.set_reference(ColumnVector::from_column([1.0, 0.0]));
        let y = ColumnVector::from_column([0.5]);
        b.iter(|| ss.update(black_box(&y)))
    });

    g.bench_function("nalgebra", |b| {
        let mut ss = NalgebraLoop::elevator();
        b.iter(|| ss.update(black_box(0.5)))
    });

    g.finish();
}

fn elevator_kf_update(c: &mut Criterion) {
    let mut g = c.benchmark_group("elevator_kf_update");

    g.bench_function("statespace", |b| {
        let mut ss = make_elevator_kf_loop().unwrap();
        ss.set_reference(ColumnVector::from_column([1.0, 0.0]));
        let y = ColumnVector::from_column([0.5, 0.1]);
        b.iter(|| ss.update(black_box(&y)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Reference generation
// ---------------------------------------------------------------------------

fn profile_sample(c: &mut Criterion) {
    let mut g = c.benchmark_group("profile_sample");

    g.bench_function("trapezoid", |b| {
        let profile = TrapezoidalProfile::new(
            Constraints::new(0.762, 1.143),
            ProfileState::new(0.77, 0.0),
            ProfileState::new(0.0, 0.0),
        )
        .unwrap();
        b.iter(|| profile.sample(black_box(0.85)))
    });

    g.finish();
}

criterion_group!(benches, elevator_update, elevator_kf_update, profile_sample);
criterion_main!(benches);

use async_trait::async_trait;
use criterion::{Criterion, criterion_group, criterion_main};
use saga::{Saga, SagaBuilder, Step};

struct Increment {
    fail: bool,
}

#[async_trait]
impl Step for Increment {
    type Input = u64;
    type Output = u64;
    type Context = ();
    type Error = ();

    fn name(&self) -> &'static str {
        "increment"
    }

    async fn execute(&self, _ctx: &mut (), input: u64) -> Result<u64, ()> {
        if self.fail {
            return Err(());
        }
        Ok(input + 1)
    }

    async fn compensate(&self, _ctx: &mut (), _output: u64) -> Result<(), ()> {
        Ok(())
    }
}

fn ten_step_saga(fail_last: bool) -> Saga<u64, u64, (), ()> {
    let mut builder = SagaBuilder::new("bench");
    for _ in 0..9 {
        builder = builder.then(Increment { fail: false });
    }
    builder.then(Increment { fail: fail_last }).build()
}

fn bench_forward_only(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let saga = ten_step_saga(false);

    c.bench_function("saga/ten_steps_success", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut coordinator = saga.coordinator();
                coordinator.execute(&mut (), 0).await.unwrap();
            });
        });
    });
}

fn bench_full_compensation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let saga = ten_step_saga(true);

    c.bench_function("saga/ten_steps_compensated", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut coordinator = saga.coordinator();
                assert!(coordinator.execute(&mut (), 0).await.is_none());
            });
        });
    });
}

criterion_group!(benches, bench_forward_only, bench_full_compensation);
criterion_main!(benches);

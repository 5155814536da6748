use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use safari_booking::{validate, BookingDraft, PaymentMethod};

fn random_draft(rng: &mut impl Rng) -> BookingDraft {
    let first_names = ["Ana", "Brian", "Wanjiku", ""];
    let phones = ["0712345678", "254712345678", "123", "+254712345678"];
    let emails = ["a@b.com", "guest@example.com", "not-an-email"];

    let check_in = NaiveDate::from_ymd_opt(2025, 6, rng.gen_range(1..=28)).unwrap();
    let nights = rng.gen_range(-2i64..=10);

    BookingDraft::new()
        .with_check_in(check_in)
        .with_check_out(check_in + chrono::Duration::days(nights))
        .with_guests(rng.gen_range(0..=10))
        .with_first_name(*first_names.choose(rng).unwrap())
        .with_last_name("Lee")
        .with_email(*emails.choose(rng).unwrap())
        .with_phone(*phones.choose(rng).unwrap())
        .with_payment_method(PaymentMethod::Mpesa)
        .with_agree_to_terms(rng.gen_bool(0.8))
}

// Benchmark for the draft validator
pub fn validation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_draft_validation");

    // Benchmark with different batch sizes to show the per-draft cost is flat
    for batch_size in [1, 100, 10_000].iter() {
        let mut rng = thread_rng();
        let drafts: Vec<BookingDraft> = (0..*batch_size).map(|_| random_draft(&mut rng)).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &drafts,
            |b, drafts| {
                b.iter(|| {
                    let mut submittable = 0usize;
                    for draft in drafts {
                        if validate(black_box(draft)).is_submittable() {
                            submittable += 1;
                        }
                    }
                    black_box(submittable)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, validation_benchmark);
criterion_main!(benches);

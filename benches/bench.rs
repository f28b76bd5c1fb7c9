// Criterion benchmarks for the UniMatch matching core

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use unimatch::core::{
    distance::{calculate_bounding_box, haversine_distance},
    filters::{is_candidate, within_reach},
};
use unimatch::models::{AgeRange, Gender, GeoPoint, InterestedIn, Photo, UserProfile};
use uuid::Uuid;

fn create_profile(i: usize, lat: f64, lon: f64) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: Uuid::new_v4(),
        email: format!("user{}@uni-bonn.de", i),
        first_name: format!("User{}", i),
        last_name: "Bench".to_string(),
        age: 18 + (i % 13) as u8,
        gender: if i % 2 == 0 { Gender::Female } else { Gender::Male },
        interested_in: InterestedIn::Both,
        university: "uni-bonn.de".to_string(),
        course: "CS".to_string(),
        year_of_study: 1 + (i % 7) as u8,
        bio: "bench".to_string(),
        photos: vec![Photo {
            url: "main.jpg".to_string(),
            is_main: true,
        }],
        location: GeoPoint::new(lon, lat),
        age_range: AgeRange { min: 18, max: 30 },
        max_distance_km: 50,
        is_verified: i % 3 != 0,
        profile_completed: true,
        liked_users: vec![],
        disliked_users: vec![],
        matches: vec![],
        last_active: now,
        created_at: now,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(50.7374),
                black_box(7.0982),
                black_box(50.9375),
                black_box(6.9603),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| calculate_bounding_box(black_box(50.7374), black_box(7.0982), black_box(50.0)));
    });
}

fn bench_candidate_filtering(c: &mut Criterion) {
    let actor = create_profile(1, 50.7374, 7.0982);

    let mut group = c.benchmark_group("candidate_filtering");

    for pool_size in [10, 100, 1000].iter() {
        let pool: Vec<UserProfile> = (0..*pool_size)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.001) % 0.5;
                create_profile(i, 50.7374 + lat_offset, 7.0982 + lon_offset)
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("filter_pool", pool_size), pool_size, |b, _| {
            b.iter(|| {
                let passed: Vec<_> = pool
                    .iter()
                    .filter(|target| is_candidate(black_box(&actor), target))
                    .filter(|target| within_reach(&actor, target))
                    .collect();
                black_box(passed)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_candidate_filtering
);

criterion_main!(benches);

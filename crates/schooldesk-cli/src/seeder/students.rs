//! Student seeding.
//!
//! Records are generated in parallel with rayon and inserted in multi-row
//! batches inside a single transaction.

use chrono::{Duration, NaiveDate, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, CountryName, PostCode, StateName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use schooldesk_models::{Address, FeesStatus, Gender, NewStudent, ParentDetails, StudentId};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::time::Instant;

const CLASSES: usize = 12;
const SECTIONS: [&str; 3] = ["A", "B", "C"];

/// Generates `count` students. Roll numbers are `{prefix}-{index}`, so a
/// fresh prefix per run keeps them unique.
pub fn generate_students(count: usize, prefix: &str) -> Vec<NewStudent> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_student(idx, prefix))
        .collect()
}

fn generate_student(idx: usize, prefix: &str) -> NewStudent {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let father_name = format!("{} {}", FirstName().fake::<String>(), last_name);
    let mother_name = format!("{} {}", FirstName().fake::<String>(), last_name);

    let grade = (1..CLASSES + 1).fake::<usize>();
    let age_days = ((grade as i64 + 5) * 365) + (0..365).fake::<i64>();
    let today = Utc::now().date_naive();
    let date_of_birth = today
        .checked_sub_signed(Duration::days(age_days))
        .unwrap_or(NaiveDate::MIN);

    NewStudent {
        name: format!("{first_name} {last_name}"),
        roll_number: format!("{prefix}-{idx:05}"),
        class_name: format!("Grade {grade}"),
        section: SECTIONS[idx % SECTIONS.len()].to_string(),
        date_of_birth,
        gender: Gender::ALL[(0..2).fake::<usize>()],
        address: Address {
            street: StreetName().fake(),
            city: CityName().fake(),
            state: StateName().fake(),
            postal_code: PostCode().fake(),
            country: CountryName().fake(),
        },
        parent_details: ParentDetails {
            father_name,
            mother_name,
            contact_number: PhoneNumber().fake(),
        },
        admission_date: Utc::now(),
        fees_status: FeesStatus::ALL[(0..FeesStatus::ALL.len()).fake::<usize>()],
    }
}

/// Seeds `count` fake students and returns how many rows were inserted.
pub async fn seed_students(db: &PgPool, count: usize) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("Seeding {} students...", count);

    let prefix = format!("SEED{}", Utc::now().format("%y%m%d%H%M%S"));
    let students = generate_students(count, &prefix);
    let inserted = insert_students_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts students in chunks within one transaction.
pub async fn insert_students_batch(
    db: &PgPool,
    students: &[NewStudent],
) -> Result<u64, Box<dyn std::error::Error>> {
    // 11 params per student, Postgres allows 65535 per statement
    const BATCH_SIZE: usize = 5000;

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        inserted += insert_students_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[NewStudent],
) -> Result<u64, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(0);
    }

    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO students (id, name, roll_number, class_name, section, date_of_birth, \
         gender, address, parent_details, admission_date, fees_status) ",
    );
    query.push_values(students, |mut row, student| {
        row.push_bind(StudentId::new())
            .push_bind(&student.name)
            .push_bind(&student.roll_number)
            .push_bind(&student.class_name)
            .push_bind(&student.section)
            .push_bind(student.date_of_birth)
            .push_bind(student.gender.as_str())
            .push_bind(Json(&student.address))
            .push_bind(Json(&student.parent_details))
            .push_bind(student.admission_date)
            .push_bind(student.fees_status.as_str());
    });

    let result = query.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

use super::IUserRepo;
use agenda_domain::{User, ID};
use chrono_tz::{Tz, UTC};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: String,
    email: String,
    timezone: String,
    created: i64,
}

impl From<UserRaw> for User {
    fn from(u: UserRaw) -> Self {
        Self {
            id: u.user_uid.into(),
            name: u.name,
            email: u.email,
            timezone: u.timezone.parse::<Tz>().unwrap_or(UTC),
            created: u.created,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, name, email, timezone, created)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.timezone.name())
        .bind(user.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                timezone = $4
            WHERE user_uid = $1
            "#,
        )
        .bind(*user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.timezone.name())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        match sqlx::query_as::<_, UserRaw>(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(u) => Some(u.into()),
            Err(_) => None,
        }
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(u) => Some(u.into()),
            Err(_) => None,
        }
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        let ids = user_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let users: Vec<UserRaw> = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}

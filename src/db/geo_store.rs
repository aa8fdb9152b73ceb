use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::geo::{Address, AddressDto, City, CityDto, Province, ProvinceDto},
    models::named::normalize,
};

/// Province store for database operations. Names are uppercased before the
/// uniqueness check and the write, which run in one transaction per record.
pub struct ProvinceStore {
    pool: DbPool,
}

impl ProvinceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Province>> {
        let provinces =
            sqlx::query_as::<_, Province>("SELECT * FROM provinces ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(provinces)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Province> {
        let province = sqlx::query_as::<_, Province>("SELECT * FROM provinces WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(province)
    }

    pub async fn create(&self, dto: ProvinceDto) -> Result<Province> {
        let name = normalize(&dto.name);

        let mut tx = self.pool.begin().await?;
        check_unique_province(&mut tx, &name, None).await?;

        let result = sqlx::query("INSERT INTO provinces (name) VALUES (?)")
            .bind(&name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: ProvinceDto) -> Result<Province> {
        let name = normalize(&dto.name);
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_province(&mut tx, &name, Some(id)).await?;

        sqlx::query("UPDATE provinces SET name = ? WHERE id = ?")
            .bind(&name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Deleting a province cascades down to cities, addresses and everything
    /// rooted in them.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM provinces WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Pre-save uniqueness check, scoped to exclude the record's own id so an
/// update that keeps the name does not conflict with itself.
async fn check_unique_province(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM provinces WHERE name = ? AND id != COALESCE(?, -1)",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_optional(&mut **tx)
    .await?;

    if existing.is_some() {
        return Err(AppError::validation(
            "name",
            "a province with this name already exists",
        ));
    }
    Ok(())
}

/// City store. The (name, province) pair is unique, so the same city name
/// may exist in two different provinces.
pub struct CityStore {
    pool: DbPool,
}

impl CityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(cities)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<City> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(city)
    }

    pub async fn create(&self, dto: CityDto) -> Result<City> {
        let name = normalize(&dto.name);

        let mut tx = self.pool.begin().await?;
        check_unique_city(&mut tx, &name, dto.province_id, None).await?;

        let result = sqlx::query("INSERT INTO cities (name, province_id) VALUES (?, ?)")
            .bind(&name)
            .bind(dto.province_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: CityDto) -> Result<City> {
        let name = normalize(&dto.name);
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_city(&mut tx, &name, dto.province_id, Some(id)).await?;

        sqlx::query("UPDATE cities SET name = ?, province_id = ? WHERE id = ?")
            .bind(&name)
            .bind(dto.province_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

async fn check_unique_city(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    name: &str,
    province_id: i64,
    exclude_id: Option<i64>,
) -> Result<()> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM cities WHERE name = ? AND province_id = ? AND id != COALESCE(?, -1)",
    )
    .bind(name)
    .bind(province_id)
    .bind(exclude_id)
    .fetch_optional(&mut **tx)
    .await?;

    if existing.is_some() {
        return Err(AppError::validation(
            "name",
            "a city with this name already exists in this province",
        ));
    }
    Ok(())
}

/// Address store. The (street, number, city) triple is unique.
pub struct AddressStore {
    pool: DbPool,
}

impl AddressStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Address>> {
        let addresses =
            sqlx::query_as::<_, Address>("SELECT * FROM addresses ORDER BY street, number")
                .fetch_all(&self.pool)
                .await?;

        Ok(addresses)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Address> {
        let address = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(address)
    }

    pub async fn create(&self, dto: AddressDto) -> Result<Address> {
        let street = normalize(&dto.street);
        check_number(dto.number)?;

        let mut tx = self.pool.begin().await?;
        check_unique_address(&mut tx, &street, dto.number, dto.city_id, None).await?;

        let result = sqlx::query("INSERT INTO addresses (street, number, city_id) VALUES (?, ?, ?)")
            .bind(&street)
            .bind(dto.number)
            .bind(dto.city_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: AddressDto) -> Result<Address> {
        let street = normalize(&dto.street);
        check_number(dto.number)?;
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_address(&mut tx, &street, dto.number, dto.city_id, Some(id)).await?;

        sqlx::query("UPDATE addresses SET street = ?, number = ?, city_id = ? WHERE id = ?")
            .bind(&street)
            .bind(dto.number)
            .bind(dto.city_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn check_number(number: i64) -> Result<()> {
    if number <= 0 {
        return Err(AppError::validation(
            "number",
            "street number must be positive",
        ));
    }
    Ok(())
}

async fn check_unique_address(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    street: &str,
    number: i64,
    city_id: i64,
    exclude_id: Option<i64>,
) -> Result<()> {
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM addresses \
         WHERE street = ? AND number = ? AND city_id = ? AND id != COALESCE(?, -1)",
    )
    .bind(street)
    .bind(number)
    .bind(city_id)
    .bind(exclude_id)
    .fetch_optional(&mut **tx)
    .await?;

    if existing.is_some() {
        return Err(AppError::validation(
            "street",
            "this address already exists in this city",
        ));
    }
    Ok(())
}

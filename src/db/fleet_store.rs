use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::fleet::{Vehicle, VehicleDto, VehicleView},
};

/// Vehicle store, keyed by license plate rather than a surrogate id.
pub struct VehicleStore {
    pool: DbPool,
}

impl VehicleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY plate")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn get_by_plate(&self, plate: &str) -> Result<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate = ?")
            .bind(plate)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(vehicle)
    }

    pub async fn create(&self, dto: VehicleDto) -> Result<Vehicle> {
        if dto.plate.trim().is_empty() {
            return Err(AppError::validation("plate", "license plate is required"));
        }

        let mut tx = self.pool.begin().await?;
        let existing =
            sqlx::query_scalar::<_, String>("SELECT plate FROM vehicles WHERE plate = ?")
                .bind(&dto.plate)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(AppError::validation(
                "plate",
                "a vehicle with this license plate already exists",
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO vehicles (plate, capacity, employee_id, vehicle_type_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&dto.plate)
        .bind(dto.capacity)
        .bind(dto.employee_id)
        .bind(dto.vehicle_type_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get_by_plate(&dto.plate).await
    }

    /// The plate is the vehicle's identity and cannot be renamed; a payload
    /// carrying a different plate is rejected rather than silently ignored.
    pub async fn update(&self, plate: &str, dto: VehicleDto) -> Result<Vehicle> {
        if dto.plate != plate {
            return Err(AppError::validation(
                "plate",
                "license plate cannot be changed",
            ));
        }
        self.get_by_plate(plate).await?;

        sqlx::query(
            r#"
            UPDATE vehicles
            SET capacity = ?, employee_id = ?, vehicle_type_id = ?
            WHERE plate = ?
            "#,
        )
        .bind(dto.capacity)
        .bind(dto.employee_id)
        .bind(dto.vehicle_type_id)
        .bind(plate)
        .execute(&self.pool)
        .await?;

        self.get_by_plate(plate).await
    }

    pub async fn delete(&self, plate: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE plate = ?")
            .bind(plate)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Rated capacity minus the weight currently on the road: the sum over
    /// packages whose shipment uses this vehicle and is still en route.
    /// Delivered cargo does not count. Recomputed from the persisted state
    /// on every call, and may go negative when over-committed.
    pub async fn remaining_capacity(&self, plate: &str) -> Result<f64> {
        let vehicle = self.get_by_plate(plate).await?;

        let carried: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(p.weight), 0.0)
            FROM packages p
            JOIN shipments s ON s.id = p.shipment_id
            WHERE s.vehicle_plate = ? AND s.status = 'EN_ROUTE'
            "#,
        )
        .bind(plate)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle.capacity - carried)
    }

    pub async fn get_view(&self, plate: &str) -> Result<VehicleView> {
        let vehicle = self.get_by_plate(plate).await?;
        let remaining_capacity = self.remaining_capacity(plate).await?;
        Ok(VehicleView {
            vehicle,
            remaining_capacity,
        })
    }

    pub async fn get_all_views(&self) -> Result<Vec<VehicleView>> {
        let vehicles = self.get_all().await?;
        let mut views = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let remaining_capacity = self.remaining_capacity(&vehicle.plate).await?;
            views.push(VehicleView {
                vehicle,
                remaining_capacity,
            });
        }
        Ok(views)
    }
}

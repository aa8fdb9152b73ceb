use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::db::{
    self, DbPool,
    catalog_store::{BranchStore, DocumentTypeStore, VehicleTypeStore},
    fleet_store::VehicleStore,
    geo_store::{AddressStore, CityStore, ProvinceStore},
    party_store::{ClientStore, EmployeeStore},
    shipment_store::{PackageStore, ShipmentStore},
};
use crate::error::AppError;
use crate::models::{
    catalog::{Branch, BranchDto, CatalogDto, DocumentType, VehicleType},
    fleet::{Vehicle, VehicleDto},
    geo::{Address, AddressDto, City, CityDto, Province, ProvinceDto},
    party::{Client, ClientDto, Employee, EmployeeDto},
    shipment::{PackageDto, Shipment, ShipmentDto, ShipmentStatus},
};

// Helper function to set up an in-memory test database. A single connection
// keeps every query on the same in-memory instance.
async fn setup_pool() -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("invalid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open test database");

    db::setup_database(&pool).await.expect("Failed to set up schema");
    pool
}

async fn create_test_province(pool: &DbPool, name: &str) -> Province {
    ProvinceStore::new(pool.clone())
        .create(ProvinceDto {
            name: name.to_string(),
        })
        .await
        .expect("Failed to create province")
}

async fn create_test_city(pool: &DbPool, name: &str, province_id: i64) -> City {
    CityStore::new(pool.clone())
        .create(CityDto {
            name: name.to_string(),
            province_id,
        })
        .await
        .expect("Failed to create city")
}

async fn create_test_address(pool: &DbPool, street: &str, number: i64, city_id: i64) -> Address {
    AddressStore::new(pool.clone())
        .create(AddressDto {
            street: street.to_string(),
            number,
            city_id,
        })
        .await
        .expect("Failed to create address")
}

async fn create_test_document_type(pool: &DbPool, name: &str) -> DocumentType {
    DocumentTypeStore::new(pool.clone())
        .create(CatalogDto {
            name: name.to_string(),
        })
        .await
        .expect("Failed to create document type")
}

async fn create_test_vehicle_type(pool: &DbPool, name: &str) -> VehicleType {
    VehicleTypeStore::new(pool.clone())
        .create(CatalogDto {
            name: name.to_string(),
        })
        .await
        .expect("Failed to create vehicle type")
}

async fn create_test_branch(pool: &DbPool, name: &str, address_id: i64) -> Branch {
    BranchStore::new(pool.clone())
        .create(BranchDto {
            name: name.to_string(),
            address_id,
        })
        .await
        .expect("Failed to create branch")
}

async fn create_test_employee(
    pool: &DbPool,
    document_number: i64,
    address_id: i64,
    branch_id: i64,
    document_type_id: i64,
) -> Employee {
    EmployeeStore::new(pool.clone())
        .create(EmployeeDto {
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            document_number,
            hired_on: chrono::NaiveDate::from_ymd_opt(2020, 3, 15),
            address_id,
            branch_id,
            document_type_id,
        })
        .await
        .expect("Failed to create employee")
}

async fn create_test_client(
    pool: &DbPool,
    document_number: i64,
    document_type_id: i64,
    address_id: i64,
) -> Client {
    ClientStore::new(pool.clone())
        .create(ClientDto {
            first_name: "Luis".to_string(),
            last_name: "Perez".to_string(),
            phone: Some("341-5550000".to_string()),
            document_number,
            document_type_id,
            address_id,
        })
        .await
        .expect("Failed to create client")
}

async fn create_test_vehicle(
    pool: &DbPool,
    plate: &str,
    capacity: f64,
    employee_id: i64,
    vehicle_type_id: i64,
) -> Vehicle {
    VehicleStore::new(pool.clone())
        .create(VehicleDto {
            plate: plate.to_string(),
            capacity,
            employee_id,
            vehicle_type_id,
        })
        .await
        .expect("Failed to create vehicle")
}

async fn create_test_shipment(
    pool: &DbPool,
    shipped_at: DateTime<Utc>,
    branch_id: i64,
    client_id: i64,
    vehicle_plate: &str,
    status: ShipmentStatus,
) -> Shipment {
    ShipmentStore::new(pool.clone())
        .create(ShipmentDto {
            shipped_at,
            branch_id,
            client_id,
            vehicle_plate: vehicle_plate.to_string(),
            status,
        })
        .await
        .expect("Failed to create shipment")
}

async fn create_test_package(pool: &DbPool, weight: f64, description: &str, shipment_id: i64) {
    PackageStore::new(pool.clone())
        .create(PackageDto {
            weight,
            width: 10.0,
            height: 10.0,
            length: 10.0,
            description: description.to_string(),
            shipment_id,
        })
        .await
        .expect("Failed to create package");
}

/// A fully linked entity graph used by the capacity, cascade and report tests.
struct Graph {
    province: Province,
    city: City,
    address: Address,
    doc_type: DocumentType,
    branch: Branch,
    employee: Employee,
    vehicle_type: VehicleType,
    vehicle: Vehicle,
    client: Client,
}

async fn seed_graph(pool: &DbPool) -> Graph {
    let province = create_test_province(pool, "Santa Fe").await;
    let city = create_test_city(pool, "Rosario", province.id).await;
    let address = create_test_address(pool, "San Martin", 1200, city.id).await;
    let doc_type = create_test_document_type(pool, "DNI").await;
    let branch = create_test_branch(pool, "Central", address.id).await;
    let employee =
        create_test_employee(pool, 30111222, address.id, branch.id, doc_type.id).await;
    let vehicle_type = create_test_vehicle_type(pool, "Camion").await;
    let vehicle = create_test_vehicle(pool, "AB123CD", 1000.0, employee.id, vehicle_type.id).await;
    let client = create_test_client(pool, 27888999, doc_type.id, address.id).await;

    Graph {
        province,
        city,
        address,
        doc_type,
        branch,
        employee,
        vehicle_type,
        vehicle,
        client,
    }
}

fn assert_validation(err: AppError, expected_field: &str) {
    match err {
        AppError::Validation { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected validation error, got {other:?}"),
    }
}

mod uniqueness_tests {
    use super::*;

    #[tokio::test]
    async fn province_names_are_unique_ignoring_case() {
        let pool = setup_pool().await;
        let store = ProvinceStore::new(pool.clone());

        let first = create_test_province(&pool, "santa fe").await;
        assert_eq!(first.name, "SANTA FE");

        let err = store
            .create(ProvinceDto {
                name: "SANTA FE".to_string(),
            })
            .await
            .expect_err("duplicate should be rejected");
        assert_validation(err, "name");
    }

    #[tokio::test]
    async fn province_update_does_not_conflict_with_itself() {
        let pool = setup_pool().await;
        let store = ProvinceStore::new(pool.clone());
        let province = create_test_province(&pool, "Chaco").await;

        let updated = store
            .update(
                province.id,
                ProvinceDto {
                    name: "chaco".to_string(),
                },
            )
            .await
            .expect("same-name update should pass");
        assert_eq!(updated.name, "CHACO");
    }

    #[tokio::test]
    async fn city_pair_is_unique_per_province() {
        let pool = setup_pool().await;
        let store = CityStore::new(pool.clone());
        let santa_fe = create_test_province(&pool, "Santa Fe").await;
        let cordoba = create_test_province(&pool, "Cordoba").await;

        create_test_city(&pool, "San Francisco", santa_fe.id).await;

        let err = store
            .create(CityDto {
                name: "san francisco".to_string(),
                province_id: santa_fe.id,
            })
            .await
            .expect_err("duplicate pair should be rejected");
        assert_validation(err, "name");

        // Same city name in a different province is a different pair
        let other = create_test_city(&pool, "San Francisco", cordoba.id).await;
        assert_eq!(other.name, "SAN FRANCISCO");
    }

    #[tokio::test]
    async fn address_triple_is_unique() {
        let pool = setup_pool().await;
        let store = AddressStore::new(pool.clone());
        let province = create_test_province(&pool, "Santa Fe").await;
        let city = create_test_city(&pool, "Rosario", province.id).await;

        create_test_address(&pool, "Mitre", 100, city.id).await;

        let err = store
            .create(AddressDto {
                street: "mitre".to_string(),
                number: 100,
                city_id: city.id,
            })
            .await
            .expect_err("duplicate triple should be rejected");
        assert_validation(err, "street");

        // Only the number differs, which makes it a new address
        let next_door = create_test_address(&pool, "Mitre", 102, city.id).await;
        assert_eq!(next_door.street, "MITRE");
    }

    #[tokio::test]
    async fn address_number_must_be_positive() {
        let pool = setup_pool().await;
        let province = create_test_province(&pool, "Santa Fe").await;
        let city = create_test_city(&pool, "Rosario", province.id).await;

        let err = AddressStore::new(pool.clone())
            .create(AddressDto {
                street: "Mitre".to_string(),
                number: 0,
                city_id: city.id,
            })
            .await
            .expect_err("zero number should be rejected");
        assert_validation(err, "number");
    }

    #[tokio::test]
    async fn employee_document_number_is_unique() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let err = EmployeeStore::new(pool.clone())
            .create(EmployeeDto {
                first_name: "Marta".to_string(),
                last_name: "Suarez".to_string(),
                document_number: graph.employee.document_number,
                hired_on: None,
                address_id: graph.address.id,
                branch_id: graph.branch.id,
                document_type_id: graph.doc_type.id,
            })
            .await
            .expect_err("duplicate document number should be rejected");
        assert_validation(err, "document_number");
    }
}

mod protection_tests {
    use super::*;

    #[tokio::test]
    async fn referenced_document_type_cannot_be_deleted() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let store = DocumentTypeStore::new(pool.clone());

        let err = store
            .delete(graph.doc_type.id)
            .await
            .expect_err("referenced type delete should be refused");
        assert!(matches!(err, AppError::Protected(_)));

        // Both sides of the reference stay intact
        store
            .get_by_id(graph.doc_type.id)
            .await
            .expect("document type should still exist");
        EmployeeStore::new(pool.clone())
            .get_by_id(graph.employee.id)
            .await
            .expect("employee should still exist");
    }

    #[tokio::test]
    async fn unreferenced_document_type_can_be_deleted() {
        let pool = setup_pool().await;
        let spare = create_test_document_type(&pool, "Pasaporte").await;

        DocumentTypeStore::new(pool.clone())
            .delete(spare.id)
            .await
            .expect("unreferenced type should be deletable");
    }

    #[tokio::test]
    async fn referenced_vehicle_type_cannot_be_deleted() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let err = VehicleTypeStore::new(pool.clone())
            .delete(graph.vehicle_type.id)
            .await
            .expect_err("referenced type delete should be refused");
        assert!(matches!(err, AppError::Protected(_)));

        VehicleStore::new(pool.clone())
            .get_by_plate(&graph.vehicle.plate)
            .await
            .expect("vehicle should still exist");
    }
}

mod cascade_tests {
    use super::*;

    #[tokio::test]
    async fn deleting_a_province_cascades_through_the_graph() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let shipment = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 25.0, "Libros", shipment.id).await;

        ProvinceStore::new(pool.clone())
            .delete(graph.province.id)
            .await
            .expect("province delete should succeed");

        let err = CityStore::new(pool.clone())
            .get_by_id(graph.city.id)
            .await
            .expect_err("city should be gone");
        assert!(matches!(err, AppError::NotFound));

        for table in [
            "cities",
            "addresses",
            "branches",
            "employees",
            "clients",
            "vehicles",
            "shipments",
            "packages",
        ] {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&pool)
                .await
                .expect("count query failed");
            assert_eq!(count, 0, "expected {table} to be emptied by the cascade");
        }

        // The protected catalog tables are not part of the cascade
        DocumentTypeStore::new(pool.clone())
            .get_by_id(graph.doc_type.id)
            .await
            .expect("document type should survive the cascade");
    }

    #[tokio::test]
    async fn deleting_a_shipment_removes_its_packages() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let shipment = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 5.0, "Vasos", shipment.id).await;

        ShipmentStore::new(pool.clone())
            .delete(shipment.id)
            .await
            .expect("shipment delete should succeed");

        let packages = PackageStore::new(pool.clone()).get_all().await.unwrap();
        assert!(packages.is_empty());
    }
}

mod capacity_tests {
    use super::*;

    #[tokio::test]
    async fn remaining_capacity_counts_only_en_route_cargo() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let store = VehicleStore::new(pool.clone());

        let en_route = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 100.0, "Herramientas", en_route.id).await;
        create_test_package(&pool, 50.0, "Repuestos", en_route.id).await;

        let delivered = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::Delivered,
        )
        .await;
        create_test_package(&pool, 9999.0, "Entregado", delivered.id).await;

        let remaining = store
            .remaining_capacity(&graph.vehicle.plate)
            .await
            .expect("capacity query failed");
        assert_eq!(remaining, 850.0);
    }

    #[tokio::test]
    async fn remaining_capacity_defaults_to_full_capacity() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let remaining = VehicleStore::new(pool.clone())
            .remaining_capacity(&graph.vehicle.plate)
            .await
            .unwrap();
        assert_eq!(remaining, 1000.0);
    }

    #[tokio::test]
    async fn remaining_capacity_goes_negative_when_over_committed() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let shipment = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 1200.0, "Sobrecarga", shipment.id).await;

        let remaining = VehicleStore::new(pool.clone())
            .remaining_capacity(&graph.vehicle.plate)
            .await
            .unwrap();
        assert_eq!(remaining, -200.0);
    }
}

mod report_tests {
    use super::*;
    use crate::db::reports;

    #[tokio::test]
    async fn shipment_loads_sort_heaviest_first() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let light = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 10.0, "Plumas", light.id).await;

        let heavy = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 80.0, "Ladrillos", heavy.id).await;
        create_test_package(&pool, 20.0, "Cemento", heavy.id).await;

        let loads = reports::shipment_loads(&pool).await.unwrap();
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].shipment_id, heavy.id);
        assert_eq!(loads[0].package_count, 2);
        assert_eq!(loads[0].total_weight, 100.0);
        assert_eq!(loads[1].shipment_id, light.id);
    }

    #[tokio::test]
    async fn heavy_haulers_respect_weight_and_window() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        // Recent shipment with a heavy package
        let recent = create_test_shipment(
            &pool,
            Utc::now() - Duration::days(5),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 75.0, "Motor", recent.id).await;

        let since = Utc::now() - Duration::days(30);
        let vehicles = reports::vehicles_with_heavy_packages(&pool, since, 50.0)
            .await
            .unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].plate, graph.vehicle.plate);

        // An old heavy shipment alone does not qualify
        let old_pool = setup_pool().await;
        let old_graph = seed_graph(&old_pool).await;
        let stale = create_test_shipment(
            &old_pool,
            Utc::now() - Duration::days(90),
            old_graph.branch.id,
            old_graph.client.id,
            &old_graph.vehicle.plate,
            ShipmentStatus::Delivered,
        )
        .await;
        create_test_package(&old_pool, 75.0, "Motor viejo", stale.id).await;

        let vehicles = reports::vehicles_with_heavy_packages(&old_pool, since, 50.0)
            .await
            .unwrap();
        assert!(vehicles.is_empty());
    }

    #[tokio::test]
    async fn province_with_most_cities_wins() {
        let pool = setup_pool().await;
        let santa_fe = create_test_province(&pool, "Santa Fe").await;
        let chaco = create_test_province(&pool, "Chaco").await;
        create_test_city(&pool, "Rosario", santa_fe.id).await;
        create_test_city(&pool, "Rafaela", santa_fe.id).await;
        create_test_city(&pool, "Resistencia", chaco.id).await;

        let top = reports::province_with_most_cities(&pool)
            .await
            .unwrap()
            .expect("a province should exist");
        assert_eq!(top.province_id, santa_fe.id);
        assert_eq!(top.city_count, 2);
    }

    #[tokio::test]
    async fn province_report_is_empty_without_provinces() {
        let pool = setup_pool().await;
        let top = reports::province_with_most_cities(&pool).await.unwrap();
        assert!(top.is_none());
    }

    #[tokio::test]
    async fn employees_filtered_by_province_name_any_case() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        let found = reports::employees_in_province(&pool, "santa fe").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, graph.employee.id);

        let missing = reports::employees_in_province(&pool, "Chubut").await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn package_description_search_is_case_insensitive() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let shipment = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 2.0, "Copas FRAGIL embalar con cuidado", shipment.id).await;
        create_test_package(&pool, 3.0, "Herramientas", shipment.id).await;

        let hits = reports::packages_matching_description(&pool, "fragil")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].description.contains("FRAGIL"));
    }

    #[tokio::test]
    async fn staffed_branches_filters_by_headcount() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;

        // Only one employee on the seeded branch, threshold two filters it out
        let rows = reports::branches_with_headcount(&pool, 2).await.unwrap();
        assert!(rows.is_empty());

        create_test_employee(&pool, 40555666, graph.address.id, graph.branch.id, graph.doc_type.id)
            .await;
        let rows = reports::branches_with_headcount(&pool, 2).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_count, 2);
    }

    #[tokio::test]
    async fn vehicle_type_stats_average_weight() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let shipment = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        create_test_package(&pool, 30.0, "Cajas", shipment.id).await;
        create_test_package(&pool, 50.0, "Bolsas", shipment.id).await;

        let stats = reports::vehicle_type_stats(&pool).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].shipment_count, 1);
        assert_eq!(stats[0].avg_package_weight, Some(40.0));
    }

    #[tokio::test]
    async fn idle_employees_have_no_vehicles() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let idle = create_test_employee(
            &pool,
            50777888,
            graph.address.id,
            graph.branch.id,
            graph.doc_type.id,
        )
        .await;

        let rows = reports::employees_without_vehicles(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, idle.id);

        let counts = reports::employee_vehicle_counts(&pool).await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].employee_id, graph.employee.id);
        assert_eq!(counts[0].vehicle_count, 1);
    }

    #[tokio::test]
    async fn client_last_shipment_dates() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let older = Utc::now() - Duration::days(10);
        let newer = Utc::now() - Duration::days(1);
        create_test_shipment(
            &pool,
            older,
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::Delivered,
        )
        .await;
        create_test_shipment(
            &pool,
            newer,
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;

        let rows = reports::client_last_shipments(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        let last = rows[0].last_shipped_at.expect("client has shipments");
        assert!((last - newer).num_seconds().abs() < 2);
    }
}

mod integrity_tests {
    use super::*;

    #[tokio::test]
    async fn dangling_owning_reference_is_a_validation_error() {
        let pool = setup_pool().await;

        let err = PackageStore::new(pool.clone())
            .create(PackageDto {
                weight: 1.0,
                width: 10.0,
                height: 10.0,
                length: 10.0,
                description: "Sin envio".to_string(),
                shipment_id: 424242,
            })
            .await
            .expect_err("unknown shipment id should be rejected");
        assert_validation(err, "reference");
    }

    #[tokio::test]
    async fn commit_time_unique_collision_maps_to_validation() {
        let pool = setup_pool().await;
        create_test_province(&pool, "Santa Fe").await;

        // Bypass the store's pre-save check so the unique index itself
        // reports the collision, the way a racing writer would see it.
        let err = sqlx::query("INSERT INTO provinces (name) VALUES (?)")
            .bind("SANTA FE")
            .execute(&pool)
            .await
            .expect_err("duplicate insert should hit the unique index");
        assert_validation(AppError::from(err), "unique");
    }
}

mod store_tests {
    use super::*;

    #[tokio::test]
    async fn vehicle_plate_is_its_identity() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let store = VehicleStore::new(pool.clone());

        let err = store
            .create(VehicleDto {
                plate: graph.vehicle.plate.clone(),
                capacity: 500.0,
                employee_id: graph.employee.id,
                vehicle_type_id: graph.vehicle_type.id,
            })
            .await
            .expect_err("duplicate plate should be rejected");
        assert_validation(err, "plate");

        let err = store
            .create(VehicleDto {
                plate: "  ".to_string(),
                capacity: 500.0,
                employee_id: graph.employee.id,
                vehicle_type_id: graph.vehicle_type.id,
            })
            .await
            .expect_err("blank plate should be rejected");
        assert_validation(err, "plate");
    }

    #[tokio::test]
    async fn vehicle_update_cannot_rename_the_plate() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let store = VehicleStore::new(pool.clone());

        let err = store
            .update(
                &graph.vehicle.plate,
                VehicleDto {
                    plate: "XY987ZW".to_string(),
                    capacity: 800.0,
                    employee_id: graph.employee.id,
                    vehicle_type_id: graph.vehicle_type.id,
                },
            )
            .await
            .expect_err("plate mismatch should be rejected");
        assert_validation(err, "plate");

        // With the matching plate the update goes through
        let updated = store
            .update(
                &graph.vehicle.plate,
                VehicleDto {
                    plate: graph.vehicle.plate.clone(),
                    capacity: 800.0,
                    employee_id: graph.employee.id,
                    vehicle_type_id: graph.vehicle_type.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.capacity, 800.0);
    }

    #[tokio::test]
    async fn shipment_status_round_trips_as_text() {
        let pool = setup_pool().await;
        let graph = seed_graph(&pool).await;
        let store = ShipmentStore::new(pool.clone());

        let shipment = create_test_shipment(
            &pool,
            Utc::now(),
            graph.branch.id,
            graph.client.id,
            &graph.vehicle.plate,
            ShipmentStatus::EnRoute,
        )
        .await;
        assert_eq!(shipment.status, ShipmentStatus::EnRoute);

        let delivered = store
            .update(
                shipment.id,
                ShipmentDto {
                    shipped_at: shipment.shipped_at,
                    branch_id: shipment.branch_id,
                    client_id: shipment.client_id,
                    vehicle_plate: shipment.vehicle_plate.clone(),
                    status: ShipmentStatus::Delivered,
                },
            )
            .await
            .unwrap();
        assert_eq!(delivered.status, ShipmentStatus::Delivered);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let pool = setup_pool().await;

        let err = ProvinceStore::new(pool.clone())
            .get_by_id(99)
            .await
            .expect_err("missing id should fail");
        assert!(matches!(err, AppError::NotFound));

        let err = VehicleStore::new(pool.clone())
            .delete("ZZ999ZZ")
            .await
            .expect_err("missing plate should fail");
        assert!(matches!(err, AppError::NotFound));
    }
}

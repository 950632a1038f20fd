mod devices;
